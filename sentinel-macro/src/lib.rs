use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{Expr, ExprLit, ItemImpl, Lit, Meta, MetaNameValue, Token};

/// Attach default timings to a `Caretaker` implementation.
///
/// # Example
///
/// ```rust,ignore
/// use sentinel::{caretaker, Caretaker};
/// use std::future::Future;
/// use std::pin::Pin;
///
/// struct Heartbeat;
///
/// #[caretaker(initial_delay = "10s", fixed_rate = "${heartbeat.rate:1s}")]
/// impl Caretaker for Heartbeat {
///     fn run(&self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
///         Box::pin(async move {
///             println!("still alive");
///         })
///     }
/// }
///
/// let scheduler = PeriodicScheduler::annotated(Heartbeat, &config)?;
/// ```
///
/// # Parameters
///
/// - `fixed_rate`: period between firings (`"500ms"`, `"1s"`, integer millis, or a `${...}` placeholder)
/// - `initial_delay`: delay before the first firing; defaults to 10 seconds
#[proc_macro_attribute]
pub fn caretaker(args: TokenStream, input: TokenStream) -> TokenStream {
    let attr_args = syn::parse_macro_input!(args with Punctuated::<Meta, Token![,]>::parse_terminated);
    let input_impl = syn::parse_macro_input!(input as ItemImpl);

    let impl_type = &input_impl.self_ty;
    let (initial_delay, fixed_rate) = match parse_timing_args(&attr_args) {
        Ok(timing) => timing,
        Err(err) => return err.to_compile_error().into(),
    };

    let expanded = quote! {
        #input_impl

        impl ::sentinel::sentinel_runtime::CaretakerMetadata for #impl_type {
            fn initial_delay() -> &'static str { #initial_delay }
            fn fixed_rate() -> &'static str { #fixed_rate }
        }
    };

    TokenStream::from(expanded)
}

fn timing_value(name: &str, value: &Expr) -> syn::Result<String> {
    match value {
        Expr::Lit(ExprLit { lit: Lit::Int(i), .. }) => Ok(i.base10_digits().to_string()),
        Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) => Ok(s.value()),
        other => Err(syn::Error::new_spanned(
            other,
            format!("{name} must be an integer (milliseconds) or a string such as \"1s\""),
        )),
    }
}

fn parse_timing_args(attr_args: &Punctuated<Meta, Token![,]>) -> syn::Result<(String, String)> {
    let mut initial_delay = None;
    let mut fixed_rate = None;

    for arg in attr_args {
        let Meta::NameValue(MetaNameValue { path, value, .. }) = arg else {
            return Err(syn::Error::new_spanned(arg, "expected `name = value`"));
        };
        let name = path.get_ident().map(|i| i.to_string()).unwrap_or_default();

        match name.as_str() {
            "initial_delay" => initial_delay = Some(timing_value("initial_delay", value)?),
            "fixed_rate" => fixed_rate = Some(timing_value("fixed_rate", value)?),
            _ => {
                return Err(syn::Error::new_spanned(
                    path,
                    "unknown caretaker parameter; expected `initial_delay` or `fixed_rate`",
                ))
            }
        }
    }

    let fixed_rate = fixed_rate.ok_or_else(|| {
        syn::Error::new(proc_macro2::Span::call_site(), "caretaker requires `fixed_rate`")
    })?;
    let initial_delay = initial_delay.unwrap_or_else(|| "10s".to_string());

    Ok((initial_delay, fixed_rate))
}
