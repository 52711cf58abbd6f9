//! Procedural macros for unistore

use darling::{FromDeriveInput, FromVariant};
use proc_macro::TokenStream;
use quote::quote;
use std::collections::HashMap;
use syn::{parse_macro_input, DeriveInput};

/// Kind tag the store reserves for its init action
const RESERVED_KIND: &str = "@@INIT";

/// Container-level attributes for #[derive(Action)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(action), supports(enum_any))]
struct ActionOpts {
    ident: syn::Ident,
    data: darling::ast::Data<ActionVariant, ()>,

    /// Case convention applied to every variant name
    #[darling(default)]
    rename_all: Option<String>,
}

/// Variant-level attributes
#[derive(Debug, FromVariant)]
#[darling(attributes(action))]
struct ActionVariant {
    ident: syn::Ident,
    fields: darling::ast::Fields<()>,

    /// Explicit kind tag override
    #[darling(default)]
    name: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum RenameRule {
    Pascal,
    Snake,
    ScreamingSnake,
}

impl RenameRule {
    fn parse(rule: &str) -> Option<Self> {
        match rule {
            "PascalCase" => Some(Self::Pascal),
            "snake_case" => Some(Self::Snake),
            "SCREAMING_SNAKE_CASE" => Some(Self::ScreamingSnake),
            _ => None,
        }
    }

    fn apply(self, variant: &str) -> String {
        match self {
            Self::Pascal => variant.to_string(),
            Self::Snake => to_snake_case(variant),
            Self::ScreamingSnake => to_snake_case(variant).to_uppercase(),
        }
    }
}

/// Convert PascalCase to snake_case
fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}

/// Derive macro for the Action trait
///
/// Generates a `name()` method that returns the variant's kind tag, and an
/// inherent `KINDS` constant listing every tag in declaration order.
///
/// The tag defaults to the variant name. `#[action(rename_all = "...")]` on the
/// enum applies a case convention (`"PascalCase"`, `"snake_case"`,
/// `"SCREAMING_SNAKE_CASE"`), and `#[action(name = "...")]` on a variant sets
/// its tag explicitly. Tags must be unique and must not be `"@@INIT"`.
///
/// # Example
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// #[action(rename_all = "SCREAMING_SNAKE_CASE")]
/// enum TodoAction {
///     AddTodo { id: u64, text: String },
///     ToggleTodo { id: u64 },
///     #[action(name = "SET_VISIBILITY_FILTER")]
///     SetFilter(VisibilityFilter),
/// }
///
/// assert_eq!(TodoAction::ToggleTodo { id: 0 }.name(), "TOGGLE_TODO");
/// assert_eq!(TodoAction::KINDS.len(), 3);
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match ActionOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let name = &opts.ident;

    let variants = match &opts.data {
        darling::ast::Data::Enum(variants) => variants,
        _ => {
            return syn::Error::new_spanned(&input, "Action can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    let rule = match opts.rename_all.as_deref() {
        None => RenameRule::Pascal,
        Some(raw) => match RenameRule::parse(raw) {
            Some(rule) => rule,
            None => {
                return syn::Error::new_spanned(
                    &input.ident,
                    format!(
                        "unsupported rename_all rule {:?}; expected \"PascalCase\", \"snake_case\" or \"SCREAMING_SNAKE_CASE\"",
                        raw
                    ),
                )
                .to_compile_error()
                .into();
            }
        },
    };

    let mut kinds = Vec::with_capacity(variants.len());
    let mut seen: HashMap<String, &syn::Ident> = HashMap::new();
    for v in variants.iter() {
        let kind = v
            .name
            .clone()
            .unwrap_or_else(|| rule.apply(&v.ident.to_string()));

        if kind == RESERVED_KIND {
            return syn::Error::new_spanned(
                &v.ident,
                format!("{:?} is reserved for the store's init action", RESERVED_KIND),
            )
            .to_compile_error()
            .into();
        }
        if let Some(previous) = seen.insert(kind.clone(), &v.ident) {
            return syn::Error::new_spanned(
                &v.ident,
                format!("kind tag {:?} is already used by `{}`", kind, previous),
            )
            .to_compile_error()
            .into();
        }
        kinds.push(kind);
    }

    let name_arms = variants.iter().zip(&kinds).map(|(v, kind)| {
        let variant_name = &v.ident;

        match &v.fields.style {
            darling::ast::Style::Unit => quote! {
                #name::#variant_name => #kind
            },
            darling::ast::Style::Tuple => quote! {
                #name::#variant_name(..) => #kind
            },
            darling::ast::Style::Struct => quote! {
                #name::#variant_name { .. } => #kind
            },
        }
    });

    // An enum with no variants has no values, so `name` can never be called.
    let name_body: proc_macro2::TokenStream = if kinds.is_empty() {
        quote! { match *self {} }
    } else {
        quote! {
            match self {
                #(#name_arms),*
            }
        }
    };

    let expanded = quote! {
        impl unistore::Action for #name {
            fn name(&self) -> &'static str {
                #name_body
            }
        }

        impl #name {
            /// Every kind tag of this action type, in declaration order
            pub const KINDS: &'static [&'static str] = &[#(#kinds),*];
        }
    };

    expanded.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("AddTodo"), "add_todo");
        assert_eq!(to_snake_case("Increment"), "increment");
        assert_eq!(to_snake_case("SetVisibilityFilter"), "set_visibility_filter");
    }

    #[test]
    fn test_rename_rules() {
        let rule = RenameRule::parse("SCREAMING_SNAKE_CASE").unwrap();
        assert_eq!(rule.apply("ToggleTodo"), "TOGGLE_TODO");

        let rule = RenameRule::parse("snake_case").unwrap();
        assert_eq!(rule.apply("ToggleTodo"), "toggle_todo");

        let rule = RenameRule::parse("PascalCase").unwrap();
        assert_eq!(rule.apply("ToggleTodo"), "ToggleTodo");

        assert!(RenameRule::parse("camelCase").is_none());
    }
}
