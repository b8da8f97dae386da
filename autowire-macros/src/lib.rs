//! Procedural macros for autowire.
//!
//! Use them through the `autowire` crate, which re-exports them next to the
//! traits they implement.

use darling::ast::{Data, Fields, Style};
use darling::{FromDeriveInput, FromField};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, Ident, Path, Type, parse_macro_input};

/// Derives `Autowire` from a struct's fields.
///
/// Every field becomes a constructor parameter, in declaration order.
/// Fields of type `Arc<T>` are resolved from the container. Primitive
/// fields, `String` and `&'static str` compile but make construction fail
/// with `UnsupportedTypeHint`. Any other field type must implement
/// `Parameter`, otherwise the derive does not compile.
///
/// # Attributes
/// - `#[autowire(default)]`: no parameters, build with `Default::default()`
/// - `#[autowire(implements = "dyn Trait")]`: also implement
///   `Implements<dyn Trait>`, so the struct can be bound to the interface.
///   May be repeated.
/// - `#[autowire(crate = "path")]`: path of the autowire crate in generated
///   code, `::autowire` by default
///
/// ```rust,ignore
/// #[derive(Autowire)]
/// #[autowire(implements = "dyn Notifier")]
/// struct EmailNotifier {
///     mailer: Arc<Mailer>,
///     templates: Arc<Templates>,
/// }
/// ```
#[proc_macro_derive(Autowire, attributes(autowire))]
pub fn derive_autowire(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match AutowireInput::from_derive_input(&input) {
        Ok(parsed) => match expand(&parsed) {
            Ok(tokens) => tokens.into(),
            Err(err) => err.write_errors().into(),
        },
        Err(err) => err.write_errors().into(),
    }
}

#[derive(FromDeriveInput)]
#[darling(attributes(autowire), supports(struct_any))]
struct AutowireInput {
    ident: Ident,
    generics: syn::Generics,
    data: Data<(), AutowireField>,

    #[darling(default)]
    default: bool,

    #[darling(multiple)]
    implements: Vec<Type>,

    #[darling(rename = "crate")]
    krate: Option<Path>,
}

#[derive(FromField)]
struct AutowireField {
    ident: Option<Ident>,
    ty: Type,
}

fn expand(input: &AutowireInput) -> darling::Result<TokenStream2> {
    let krate = input
        .krate
        .clone()
        .unwrap_or_else(|| syn::parse_quote!(::autowire));
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let (parameters, assemble) = if input.default {
        (
            quote! { ::std::vec::Vec::new() },
            quote! {
                fn assemble(_: #krate::Arguments) -> #krate::Result<Self> {
                    ::std::result::Result::Ok(<Self as ::std::default::Default>::default())
                }
            },
        )
    } else {
        let fields = input
            .data
            .as_ref()
            .take_struct()
            .ok_or_else(|| darling::Error::unsupported_shape("enum"))?;
        manifest(&krate, &fields)
    };

    let implements = input.implements.iter().map(|interface| {
        quote! {
            impl #impl_generics #krate::Implements<#interface> for #ident #ty_generics #where_clause {
                fn upcast(self: ::std::sync::Arc<Self>) -> ::std::sync::Arc<#interface> {
                    self
                }
            }
        }
    });

    Ok(quote! {
        impl #impl_generics #krate::Autowire for #ident #ty_generics #where_clause {
            fn parameters() -> ::std::vec::Vec<#krate::TypeHint> {
                #parameters
            }

            #assemble
        }

        #(#implements)*
    })
}

/// Parameter list and `assemble` body for a struct built from its fields.
fn manifest(krate: &Path, fields: &Fields<&AutowireField>) -> (TokenStream2, TokenStream2) {
    let types: Vec<&Type> = fields.iter().map(|field| &field.ty).collect();

    let parameters = quote! {
        ::std::vec![#(<#types as #krate::Parameter>::hint()),*]
    };

    let construct = match fields.style {
        Style::Struct => {
            let names = fields.iter().filter_map(|field| field.ident.as_ref());
            quote! { Self { #(#names: arguments.take::<#types>()?),* } }
        }
        Style::Tuple => quote! { Self(#(arguments.take::<#types>()?),*) },
        Style::Unit => quote! { Self },
    };

    let binding = if types.is_empty() {
        quote! { _: #krate::Arguments }
    } else {
        quote! { mut arguments: #krate::Arguments }
    };

    let assemble = quote! {
        fn assemble(#binding) -> #krate::Result<Self> {
            ::std::result::Result::Ok(#construct)
        }
    };

    (parameters, assemble)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_str(input: DeriveInput) -> String {
        let parsed = AutowireInput::from_derive_input(&input).unwrap();
        expand(&parsed).unwrap().to_string()
    }

    #[test]
    fn named_fields_become_parameters() {
        let out = expand_str(syn::parse_quote! {
            struct Service {
                db: Arc<Database>,
                cache: Arc<Cache>,
            }
        });

        assert!(out.contains("impl :: autowire :: Autowire for Service"));
        assert!(out.contains("< Arc < Database > as :: autowire :: Parameter > :: hint ()"));
        assert!(out.contains("db : arguments . take :: < Arc < Database > > () ?"));
        assert!(out.contains("mut arguments"));
    }

    #[test]
    fn tuple_struct() {
        let out = expand_str(syn::parse_quote! {
            struct Wrapper(Arc<Inner>);
        });

        assert!(out.contains("Self (arguments . take :: < Arc < Inner > > () ?)"));
    }

    #[test]
    fn unit_struct_takes_no_arguments() {
        let out = expand_str(syn::parse_quote! {
            struct Marker;
        });

        assert!(!out.contains("mut arguments"));
        assert!(out.contains("Ok (Self)"));
    }

    #[test]
    fn default_ignores_fields() {
        let out = expand_str(syn::parse_quote! {
            #[autowire(default)]
            struct Settings {
                retries: u8,
            }
        });

        assert!(out.contains("Default > :: default ()"));
        assert!(!out.contains("Parameter"));
    }

    #[test]
    fn implements_is_repeatable() {
        let out = expand_str(syn::parse_quote! {
            #[autowire(implements = "dyn Reader", implements = "dyn Writer")]
            struct File;
        });

        assert!(out.contains("Implements < dyn Reader > for File"));
        assert!(out.contains("Implements < dyn Writer > for File"));
    }

    #[test]
    fn crate_path_override() {
        let out = expand_str(syn::parse_quote! {
            #[autowire(crate = "::my_di")]
            struct Service;
        });

        assert!(out.contains(":: my_di :: Autowire"));
        assert!(!out.contains(":: autowire ::"));
    }

    #[test]
    fn enums_are_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            enum Choice { A, B }
        };

        assert!(AutowireInput::from_derive_input(&input).is_err());
    }
}
