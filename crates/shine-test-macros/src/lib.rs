use proc_macro::TokenStream;
use proc_macro2::TokenStream as Tokens;
use quote::quote;
use syn::{
    meta,
    parse::{Error as ParseError, Parser},
    parse_macro_input, ItemFn, LitStr, ReturnType,
};

#[derive(Default, Debug)]
struct TestAttributes {
    pub skip: Option<LitStr>,
}

impl TestAttributes {
    fn parse(input: TokenStream) -> Result<Self, ParseError> {
        let mut attrs = Self::default();

        let parser = meta::parser(|meta| {
            if meta.path.is_ident("skip") {
                attrs.skip = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("unsupported test property"))
            }
        });

        parser.parse(input)?;
        Ok(attrs)
    }
}

/// Test attribute initializing the logger and the backtrace printer before the test body runs.
/// Supported properties
/// - skip = "reason" - ignore the test with the given reason
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attrs = match TestAttributes::parse(attr) {
        Ok(attrs) => attrs,
        Err(err) => return err.to_compile_error().into(),
    };
    let input = parse_macro_input!(item as ItemFn);

    if let Some(asyncness) = &input.sig.asyncness {
        return ParseError::new_spanned(asyncness, "async tests are not supported")
            .to_compile_error()
            .into();
    }

    let mut test_decors = vec![quote! { #[::core::prelude::v1::test] }];
    if let Some(skip) = attrs.skip {
        test_decors.push(quote! { #[ignore = #skip] });
    }

    expand_wrapper(&test_decors, &input).into()
}

/// Emit code for a wrapper function around a test function.
fn expand_wrapper(test_decors: &[Tokens], input: &ItemFn) -> Tokens {
    let attrs = &input.attrs;
    let body = &input.block;
    let test_name = &input.sig.ident;

    // #[should_panic] tests must keep the unit return type
    let ret = match &input.sig.output {
        ReturnType::Default => quote! {},
        ReturnType::Type(_, ty) => quote! {-> #ty},
    };

    quote! {
      #(#test_decors)*
      #(#attrs)*
      fn #test_name() #ret {
        fn test_impl() #ret {
          #body
        }

        ::shine_test::setup_test();

        test_impl()
      }
    }
}
