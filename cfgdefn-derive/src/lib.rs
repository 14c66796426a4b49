//! Derive macros for the cfgdefn metadata library
//!
//! This crate provides `#[derive(ManagedObject)]` for generating a managed
//! object definition from a struct whose fields are its properties.
//!
//! # Usage
//!
//! ```text
//! use cfgdefn::DeriveManagedObject;
//!
//! #[derive(DeriveManagedObject)]
//! #[managed_object(name = "ldap-connection-handler", parent = "connection-handler")]
//! struct LdapConnectionHandlerCfg {
//!     #[property(default = "5000000")]
//!     max_request_size: i64,
//!
//!     #[property(enum_values = ["DEBUG", "INFO", "WARN"], defaults = ["INFO", "WARN"])]
//!     log_level: Vec<String>,
//!
//!     #[property(syntax = "dn", relative_offset = 1, inherited_property = "base-dn")]
//!     parent_dn: String,
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Expr, Fields, GenericArgument, Lit, Meta, PathArguments, Type,
    UnOp, parse_macro_input, spanned::Spanned,
};

/// Derive macro for generating `ManagedObject` implementations.
///
/// # Attributes
///
/// ## Container attributes (`#[managed_object(...)]`)
/// - `name = "type-name"` - Managed object type name (default: struct name in kebab case)
/// - `interface = "pkg.admin.server.FooCfg"` - Configuration interface described
/// - `parent = "type-name"` - Parent definition to inherit properties from
/// - `description = "..."` - Help text
///
/// ## Field attributes (`#[property(...)]`)
/// - `name = "..."` - Property name (default: field name with `-` separators)
/// - `syntax = "boolean" | "integer" | "size" | "duration" | "string" | "enum" | "dn"`
///   (default: inferred from the field type)
/// - `enum_values = ["A", "B"]` - Enumeration constants (implies `syntax = "enum"`)
/// - `default = "literal"` / `defaults = ["a", "b"]` - Defined default literals
/// - `alias_of = "property"` - Default is an alias of another property
/// - `inherited_from = "path"` + `inherited_property = "p"` - Absolute inheritance
/// - `relative_offset = 1` + `inherited_property = "p"` - Relative inheritance
/// - `base_unit = "s"` - Base unit of a duration
/// - `min = 0`, `max = 100`, `unlimited` - Numeric bounds
/// - `pattern = "regex"` - String constraint
/// - `multi_valued`, `advanced`, `read_only`, `description = "..."`
/// - `skip` - Skip this field
///
/// `Vec<T>` fields are multi-valued; `Option<T>` fields use `T`'s syntax.
#[proc_macro_derive(ManagedObject, attributes(managed_object, property))]
pub fn derive_managed_object(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let ident = &input.ident;
    let container = parse_container_attrs(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "ManagedObject can only be derived for structs with named fields.\n\nExample:\n  #[derive(ManagedObject)]\n  struct FooCfg {\n      field: Type,\n  }",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "ManagedObject can only be derived for structs.\n\nTry: #[derive(ManagedObject)] on a struct, not an enum or union.",
            ));
        }
    };

    let type_name = container
        .name
        .clone()
        .unwrap_or_else(|| kebab_case(&ident.to_string()));

    let mut definition_modifiers = Vec::new();
    if let Some(interface) = &container.interface {
        definition_modifiers.push(quote! { .config_interface(#interface) });
    }
    if let Some(parent) = &container.parent {
        definition_modifiers.push(quote! { .extends(#parent) });
    }
    if let Some(desc) = &container.description {
        definition_modifiers.push(quote! { .description(#desc) });
    }

    let mut properties = Vec::new();
    for field in fields {
        let attrs = parse_field_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        properties.push(property_tokens(field_name, &field.ty, attrs, field.span())?);
    }

    Ok(quote! {
        impl cfgdefn::ManagedObject for #ident {
            fn definition() -> cfgdefn::ManagedObjectDefinition {
                cfgdefn::ManagedObjectDefinition::new(#type_name)
                    #(#definition_modifiers)*
                    #(.property(#properties))*
            }
        }
    })
}

fn property_tokens(
    field_name: &syn::Ident,
    ty: &Type,
    attrs: FieldAttrs,
    span: proc_macro2::Span,
) -> syn::Result<TokenStream2> {
    let property_name = attrs
        .name
        .clone()
        .unwrap_or_else(|| field_name.to_string().trim_start_matches("r#").replace('_', "-"));

    let (inferred, is_vec) = infer_syntax(ty);
    let syntax_name = if attrs.enum_values.is_some() {
        "enum".to_string()
    } else if let Some(syntax) = &attrs.syntax {
        syntax.clone()
    } else if let Some(inferred) = inferred {
        inferred.to_string()
    } else {
        return Err(syn::Error::new(
            span,
            format!(
                "cannot infer a syntax for field `{field_name}`.\n\nAdd one, e.g. #[property(syntax = \"dn\")]"
            ),
        ));
    };

    let syntax = syntax_tokens(&syntax_name, &attrs, span)?;

    let mut modifiers = Vec::new();
    modifiers.push(behavior_tokens(&attrs, span)?);
    if attrs.multi_valued || is_vec {
        modifiers.push(quote! { .multi_valued() });
    }
    if let Some(desc) = &attrs.description {
        modifiers.push(quote! { .description(#desc) });
    }
    if attrs.advanced {
        modifiers.push(quote! { .advanced() });
    }
    if attrs.read_only {
        modifiers.push(quote! { .read_only() });
    }

    Ok(quote! {
        cfgdefn::PropertyDefinition::new(#property_name, #syntax) #(#modifiers)*
    })
}

fn syntax_tokens(name: &str, attrs: &FieldAttrs, span: proc_macro2::Span) -> syn::Result<TokenStream2> {
    let lower = option_tokens(attrs.min);
    let upper = option_tokens(attrs.max);
    let unlimited = attrs.unlimited;

    let tokens = match name {
        "boolean" => quote! { cfgdefn::PropertySyntax::Boolean },
        "integer" => quote! {
            cfgdefn::PropertySyntax::Integer { lower: #lower, upper: #upper, allow_unlimited: #unlimited }
        },
        "size" => quote! {
            cfgdefn::PropertySyntax::Size { lower: #lower, upper: #upper, allow_unlimited: #unlimited }
        },
        "duration" => {
            let unit = duration_unit(attrs.base_unit.as_deref().unwrap_or("ms"), span)?;
            quote! {
                cfgdefn::PropertySyntax::Duration {
                    base_unit: cfgdefn::DurationUnit::#unit,
                    lower: #lower,
                    upper: #upper,
                    allow_unlimited: #unlimited,
                }
            }
        }
        "string" => match &attrs.pattern {
            Some(pattern) => quote! {
                cfgdefn::PropertySyntax::String { pattern: ::std::option::Option::Some(#pattern.to_string()) }
            },
            None => quote! { cfgdefn::PropertySyntax::String { pattern: ::std::option::Option::None } },
        },
        "enum" => {
            let values = attrs.enum_values.clone().unwrap_or_default();
            if values.is_empty() {
                return Err(syn::Error::new(
                    span,
                    "enum properties need constants.\n\nExample: #[property(enum_values = [\"INFO\", \"WARN\"])]",
                ));
            }
            quote! { cfgdefn::PropertySyntax::Enum { values: vec![#(#values.to_string()),*] } }
        }
        "dn" => quote! { cfgdefn::PropertySyntax::Dn },
        other => {
            return Err(syn::Error::new(
                span,
                format!("unknown syntax \"{other}\".\n\nExpected one of: boolean, integer, size, duration, string, enum, dn"),
            ));
        }
    };
    Ok(tokens)
}

fn behavior_tokens(attrs: &FieldAttrs, span: proc_macro2::Span) -> syn::Result<TokenStream2> {
    let declared = [
        attrs.defaults.is_some(),
        attrs.alias_of.is_some(),
        attrs.inherited_from.is_some(),
        attrs.relative_offset.is_some(),
    ]
    .iter()
    .filter(|set| **set)
    .count();
    if declared > 1 {
        return Err(syn::Error::new(
            span,
            "a property can declare only one of `default(s)`, `alias_of`, `inherited_from` and `relative_offset`",
        ));
    }

    let inherited_property = || {
        attrs.inherited_property.clone().ok_or_else(|| {
            syn::Error::new(
                span,
                "inherited defaults need the inherited property.\n\nExample: #[property(relative_offset = 1, inherited_property = \"base-dn\")]",
            )
        })
    };

    let tokens = if let Some(defaults) = &attrs.defaults {
        if defaults.is_empty() {
            quote! { .default_values(::std::vec::Vec::<::std::string::String>::new()) }
        } else {
            quote! { .default_values([#(#defaults),*]) }
        }
    } else if let Some(alias) = &attrs.alias_of {
        quote! { .alias_of(#alias) }
    } else if let Some(path) = &attrs.inherited_from {
        let property = inherited_property()?;
        quote! { .absolute_inherited(#path, #property) }
    } else if let Some(offset) = attrs.relative_offset {
        let property = inherited_property()?;
        quote! { .relative_inherited(#offset, #property) }
    } else {
        TokenStream2::new()
    };
    Ok(tokens)
}

fn option_tokens(value: Option<i64>) -> TokenStream2 {
    match value {
        Some(v) => quote! { ::std::option::Option::Some(#v) },
        None => quote! { ::std::option::Option::None },
    }
}

fn duration_unit(unit: &str, span: proc_macro2::Span) -> syn::Result<syn::Ident> {
    let variant = match unit {
        "ms" => "Milliseconds",
        "s" => "Seconds",
        "m" => "Minutes",
        "h" => "Hours",
        "d" => "Days",
        "w" => "Weeks",
        other => {
            return Err(syn::Error::new(
                span,
                format!("unknown duration unit \"{other}\".\n\nExpected one of: ms, s, m, h, d, w"),
            ));
        }
    };
    Ok(syn::Ident::new(variant, span))
}

/// Container-level attributes from #[managed_object(...)]
#[derive(Default)]
struct ContainerAttrs {
    name: Option<String>,
    interface: Option<String>,
    parent: Option<String>,
    description: Option<String>,
}

/// Field-level attributes from #[property(...)]
#[derive(Default)]
struct FieldAttrs {
    name: Option<String>,
    syntax: Option<String>,
    enum_values: Option<Vec<String>>,
    defaults: Option<Vec<String>>,
    alias_of: Option<String>,
    inherited_from: Option<String>,
    inherited_property: Option<String>,
    relative_offset: Option<usize>,
    base_unit: Option<String>,
    min: Option<i64>,
    max: Option<i64>,
    unlimited: bool,
    pattern: Option<String>,
    description: Option<String>,
    multi_valued: bool,
    advanced: bool,
    read_only: bool,
    skip: bool,
}

fn parse_container_attrs(attrs: &[Attribute]) -> syn::Result<ContainerAttrs> {
    let mut result = ContainerAttrs::default();

    for attr in attrs {
        if !attr.path().is_ident("managed_object") {
            continue;
        }
        let nested = attr.parse_args_with(
            syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated,
        )?;
        for meta in nested {
            let Meta::NameValue(nv) = meta else {
                return Err(syn::Error::new_spanned(
                    meta,
                    "expected `key = \"value\"` in #[managed_object(...)]",
                ));
            };
            let value = string_lit(&nv.value)?;
            if nv.path.is_ident("name") {
                result.name = Some(value);
            } else if nv.path.is_ident("interface") {
                result.interface = Some(value);
            } else if nv.path.is_ident("parent") {
                result.parent = Some(value);
            } else if nv.path.is_ident("description") {
                result.description = Some(value);
            } else {
                return Err(syn::Error::new_spanned(
                    &nv.path,
                    "unknown #[managed_object] attribute.\n\nExpected one of: name, interface, parent, description",
                ));
            }
        }
    }

    Ok(result)
}

fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut result = FieldAttrs::default();

    for attr in attrs {
        if !attr.path().is_ident("property") {
            continue;
        }
        let nested = attr.parse_args_with(
            syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated,
        )?;
        for meta in nested {
            match meta {
                Meta::Path(path) => {
                    if path.is_ident("multi_valued") {
                        result.multi_valued = true;
                    } else if path.is_ident("advanced") {
                        result.advanced = true;
                    } else if path.is_ident("read_only") {
                        result.read_only = true;
                    } else if path.is_ident("unlimited") {
                        result.unlimited = true;
                    } else if path.is_ident("skip") {
                        result.skip = true;
                    } else {
                        return Err(syn::Error::new_spanned(path, "unknown #[property] flag"));
                    }
                }
                Meta::NameValue(nv) => {
                    let value = &nv.value;
                    let key = nv
                        .path
                        .get_ident()
                        .map(ToString::to_string)
                        .unwrap_or_default();
                    match key.as_str() {
                        "name" => result.name = Some(string_lit(value)?),
                        "syntax" => result.syntax = Some(string_lit(value)?),
                        "enum_values" => result.enum_values = Some(string_array(value)?),
                        "default" => result.defaults = Some(vec![string_lit(value)?]),
                        "defaults" => result.defaults = Some(string_array(value)?),
                        "alias_of" => result.alias_of = Some(string_lit(value)?),
                        "inherited_from" => result.inherited_from = Some(string_lit(value)?),
                        "inherited_property" => {
                            result.inherited_property = Some(string_lit(value)?);
                        }
                        "relative_offset" => {
                            let offset = int_lit(value)?;
                            result.relative_offset = Some(usize::try_from(offset).map_err(|_| {
                                syn::Error::new_spanned(value, "#[property(relative_offset)] must be non-negative")
                            })?);
                        }
                        "base_unit" => result.base_unit = Some(string_lit(value)?),
                        "min" => result.min = Some(int_lit(value)?),
                        "max" => result.max = Some(int_lit(value)?),
                        "pattern" => result.pattern = Some(string_lit(value)?),
                        "description" => result.description = Some(string_lit(value)?),
                        _ => {
                            return Err(syn::Error::new_spanned(
                                &nv.path,
                                "unknown #[property] attribute",
                            ));
                        }
                    }
                }
                Meta::List(list) => {
                    return Err(syn::Error::new_spanned(
                        list,
                        "unexpected list in #[property].\n\nUse `key = [..]` for lists, e.g. #[property(defaults = [\"a\", \"b\"])]",
                    ));
                }
            }
        }
    }

    Ok(result)
}

fn string_lit(expr: &Expr) -> syn::Result<String> {
    if let Expr::Lit(lit) = expr {
        if let Lit::Str(s) = &lit.lit {
            return Ok(s.value());
        }
    }
    Err(syn::Error::new_spanned(expr, "expected a string literal"))
}

fn string_array(expr: &Expr) -> syn::Result<Vec<String>> {
    match expr {
        Expr::Array(array) => array.elems.iter().map(string_lit).collect(),
        _ => Err(syn::Error::new_spanned(
            expr,
            "expected an array of string literals, e.g. [\"a\", \"b\"]",
        )),
    }
}

fn int_lit(expr: &Expr) -> syn::Result<i64> {
    match expr {
        Expr::Lit(lit) => {
            if let Lit::Int(i) = &lit.lit {
                return i.base10_parse::<i64>();
            }
        }
        Expr::Unary(unary) if matches!(unary.op, UnOp::Neg(_)) => {
            return int_lit(&unary.expr).map(|v| -v);
        }
        _ => {}
    }
    Err(syn::Error::new_spanned(expr, "expected an integer literal"))
}

/// Infer the syntax of a field type, and whether it is a `Vec`
fn infer_syntax(ty: &Type) -> (Option<&'static str>, bool) {
    let Type::Path(path) = ty else {
        return (None, false);
    };
    let Some(segment) = path.path.segments.last() else {
        return (None, false);
    };

    let name = segment.ident.to_string();
    if name == "Vec" || name == "Option" {
        let inner = match &segment.arguments {
            PathArguments::AngleBracketed(args) => args.args.iter().find_map(|arg| match arg {
                GenericArgument::Type(inner) => Some(inner),
                _ => None,
            }),
            _ => None,
        };
        let syntax = inner.and_then(|inner| infer_syntax(inner).0);
        return (syntax, name == "Vec");
    }

    let syntax = match name.as_str() {
        "bool" => Some("boolean"),
        "i8" | "i16" | "i32" | "i64" | "isize" | "u8" | "u16" | "u32" | "u64" | "usize" => {
            Some("integer")
        }
        "String" | "str" => Some("string"),
        _ => None,
    };
    (syntax, false)
}

/// `LdapConnectionHandlerCfg` -> `ldap-connection-handler-cfg`
fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let chars: Vec<char> = name.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_lower = i > 0 && chars[i - 1].is_lowercase();
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let prev_upper = i > 0 && chars[i - 1].is_uppercase();
            if i > 0 && (prev_lower || (prev_upper && next_lower)) {
                out.push('-');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(*c);
        }
    }
    out
}
