//! Derive macros for the todo board.
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Names the event variants of an action enum
//! - `#[derive(State)]` - Generates revision tracking for state structs
//!
//! # Example
//!
//! ```ignore
//! use todo_board_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum TodoAction {
//!     #[command]
//!     AddTodo { title: String, description: String },
//!
//!     #[event]
//!     TodoAdded { todo: Todo, at: DateTime<Utc> },
//! }
//!
//! let command = TodoAction::AddTodo { title: "milk".into(), description: String::new() };
//! assert_eq!(command.event_type(), "unknown");
//!
//! let event = TodoAction::TodoAdded { todo: Todo::new(TodoId::new(1), "milk", ""), at: Utc::now() };
//! assert_eq!(event.event_type(), "TodoAdded.v1");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Variant};

/// Derive macro for Action enums
///
/// Generates `event_type()`: the versioned event name (`"TodoAdded.v1"`) for
/// variants marked `#[event]`, `"unknown"` for anything else. `#[command]`
/// marks the inputs; a variant marked with both attributes is a compile error.
#[proc_macro_derive(Action, attributes(command, event))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(input, "#[derive(Action)] can only be used on enums")
            .to_compile_error()
            .into();
    };

    let mut event_type_arms = Vec::new();

    for variant in &data_enum.variants {
        let is_command = has_attribute(&variant.attrs, "command");
        let is_event = has_attribute(&variant.attrs, "event");

        if is_command && is_event {
            return syn::Error::new_spanned(
                variant,
                "Variant cannot be both #[command] and #[event]",
            )
            .to_compile_error()
            .into();
        }

        if is_event {
            let pattern = variant_pattern(variant);
            let type_name = format!("{}.v1", variant.ident);
            event_type_arms.push(quote! { #pattern => #type_name, });
        }
    }

    let expanded = quote! {
        impl #name {
            /// Returns the versioned event type name
            ///
            /// Commands return "unknown".
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn event_type(&self) -> &'static str {
                match self {
                    #(#event_type_arms)*
                    _ => "unknown",
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Derive macro for State structs
///
/// Marks one `u64` field with `#[revision]` and generates:
/// - `revision()` - the current revision
/// - `bump_revision()` - increments and returns the new revision
///
/// Observers compare revisions to know when the state has been replaced and
/// needs re-rendering. Structs without a `#[revision]` field get nothing.
///
/// ```ignore
/// #[derive(State, Clone, Debug, Default)]
/// struct TodoState {
///     todos: Vec<Todo>,
///     #[revision]
///     revision: u64,
/// }
/// ```
#[proc_macro_derive(State, attributes(revision))]
pub fn derive_state(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new_spanned(input, "#[derive(State)] can only be used on structs")
            .to_compile_error()
            .into();
    };

    let mut marked = data_struct
        .fields
        .iter()
        .enumerate()
        .filter(|(_, field)| has_attribute(&field.attrs, "revision"));

    let Some((index, field)) = marked.next() else {
        return TokenStream::new();
    };

    if let Some((_, extra)) = marked.next() {
        return syn::Error::new_spanned(extra, "Only one field may be marked #[revision]")
            .to_compile_error()
            .into();
    }

    let accessor: TokenStream2 = match &field.ident {
        Some(ident) => quote! { #ident },
        None => {
            let index = syn::Index::from(index);
            quote! { #index }
        }
    };

    let expanded = quote! {
        impl #name {
            /// Returns the current revision of this state
            #[must_use]
            pub const fn revision(&self) -> u64 {
                self.#accessor
            }

            /// Advances the revision and returns the new value
            pub fn bump_revision(&mut self) -> u64 {
                self.#accessor = self.#accessor.wrapping_add(1);
                self.#accessor
            }
        }
    };

    TokenStream::from(expanded)
}

/// Match pattern that accepts any payload of `variant`
fn variant_pattern(variant: &Variant) -> TokenStream2 {
    let ident = &variant.ident;
    match &variant.fields {
        Fields::Named(_) => quote! { Self::#ident { .. } },
        Fields::Unnamed(_) => quote! { Self::#ident(..) },
        Fields::Unit => quote! { Self::#ident },
    }
}

fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}
