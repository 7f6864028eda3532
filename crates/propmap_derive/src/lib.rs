//! Derive macro for `propmap`.
//!
//! `#[derive(Introspect)]` generates a `propmap::Introspect` implementation: the type's registered class name
//! and a property table pairing every field with a type encoding. Encodings are picked from the field's Rust
//! type at expansion time:
//!
//! - scalar spellings (`i32`, `u64`, `f32`, `bool`, `c_int`, ...) use the scalar registry of `propmap_core`;
//! - `Box<T>`, `Rc<T>`, `Arc<T>`, `Option<T>` and `&T` are transparent;
//! - `*const T` / `*mut T` become `^T` (`*` for `i8`/`c_char` pointees);
//! - `fn(..)` pointers become `^?`, `()` becomes `v`, tuples `{?=..}`, arrays and slices `[N..]`;
//! - `dyn Trait` / `impl Trait` become an untyped object `@`;
//! - `Self` becomes `@"Class"` with the container's class name;
//! - the struct's own type parameters (and paths through them, like `T::Output`) become `?`;
//! - any other path becomes `@"LastSegment"` (`str` is reported as `String`).
//!
//! A field whose type derives `Introspect` under another class name should be marked `#[introspect(class)]`: its
//! encoding is then built from `<FieldType as Introspect>::class_name()` when `type_info()` runs.
//!
//! # Attributes
//!
//! - container: `#[introspect(name = "Class", extends = ParentType)]`
//! - field: `#[introspect(skip)]`, `#[introspect(rename = "wireName")]`, `#[introspect(encoding = "{Point=dd}")]`,
//!   `#[introspect(class)]`

use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{
    Data, DeriveInput, Expr, Fields, GenericArgument, Ident, Lit, LitStr, Path, PathArguments, Type, parse_macro_input,
};

use propmap_core::scalars::{self, ScalarKind};

/// Generates `propmap::Introspect` for a struct.
///
/// # Example
/// ```ignore
/// #[derive(Introspect)]
/// struct Person {
///     age: i32,
///     name: PersonName,
/// }
///
/// // Generates:
/// impl propmap::Introspect for Person {
///     fn class_name() -> &'static str { "Person" }
///     fn type_info() -> propmap::TypeInfo {
///         propmap::TypeInfo::new("Person")
///             .property("age", "i")
///             .property("name", "@\"PersonName\"")
///     }
/// }
/// ```
#[proc_macro_derive(Introspect, attributes(introspect))]
pub fn derive_introspect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input).unwrap_or_else(syn::Error::into_compile_error).into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let container = ContainerAttrs::parse(input)?;
    let class_name = container.name.unwrap_or_else(|| name.to_string());

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        Data::Enum(data) => {
            return Err(syn::Error::new(
                data.enum_token.span(),
                "Introspect can only be derived for structs",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span(),
                "Introspect can only be derived for structs",
            ));
        }
    };

    let encoder = Encoder {
        class_name: &class_name,
        type_params: input.generics.type_params().map(|p| p.ident.clone()).collect(),
    };
    let mut properties = Vec::new();
    let members: Vec<(String, &syn::Field)> = match fields {
        // Named fields (e.g. `struct Person { age: i32 }`)
        Fields::Named(named) => named
            .named
            .iter()
            .filter_map(|f| f.ident.as_ref().map(|i| (i.to_string(), f)))
            .collect(),
        // Unnamed fields (e.g. `struct Pair(i32, f64)`)
        Fields::Unnamed(unnamed) => unnamed.unnamed.iter().enumerate().map(|(i, f)| (i.to_string(), f)).collect(),
        Fields::Unit => Vec::new(),
    };
    for (member, field) in members {
        let attrs = FieldAttrs::parse(field)?;
        if attrs.skip {
            continue;
        }
        let property = attrs.rename.unwrap_or(member);
        if attrs.class {
            let target = class_target(&field.ty);
            properties.push(quote! {
                .property(
                    #property,
                    ::std::format!("@\"{}\"", <#target as ::propmap::Introspect>::class_name()),
                )
            });
            continue;
        }
        let encoding = attrs.encoding.unwrap_or_else(|| encoder.encode_type(&field.ty));
        properties.push(quote! { .property(#property, #encoding) });
    }

    let extends = container.extends.map(|parent| {
        quote! { .extends(<#parent as ::propmap::Introspect>::class_name()) }
    });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics ::propmap::Introspect for #name #ty_generics #where_clause {
            fn class_name() -> &'static str {
                #class_name
            }

            fn type_info() -> ::propmap::TypeInfo {
                ::propmap::TypeInfo::new(#class_name)
                    #extends
                    #(#properties)*
            }
        }
    })
}

#[derive(Default)]
struct ContainerAttrs {
    name: Option<String>,
    extends: Option<Path>,
}

impl ContainerAttrs {
    fn parse(input: &DeriveInput) -> syn::Result<Self> {
        let mut attrs = Self::default();
        for attr in input.attrs.iter().filter(|a| a.path().is_ident("introspect")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    attrs.name = Some(meta.value()?.parse::<LitStr>()?.value());
                    Ok(())
                } else if meta.path.is_ident("extends") {
                    attrs.extends = Some(meta.value()?.parse::<Path>()?);
                    Ok(())
                } else {
                    Err(meta.error("unsupported introspect attribute; expected `name` or `extends`"))
                }
            })?;
        }
        Ok(attrs)
    }
}

#[derive(Default)]
struct FieldAttrs {
    skip: bool,
    rename: Option<String>,
    encoding: Option<String>,
    class: bool,
}

impl FieldAttrs {
    fn parse(field: &syn::Field) -> syn::Result<Self> {
        let mut attrs = Self::default();
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("introspect")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    attrs.skip = true;
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    let lit = meta.value()?.parse::<LitStr>()?;
                    if lit.value().is_empty() {
                        return Err(syn::Error::new(lit.span(), "property name cannot be empty"));
                    }
                    attrs.rename = Some(lit.value());
                    Ok(())
                } else if meta.path.is_ident("encoding") {
                    attrs.encoding = Some(meta.value()?.parse::<LitStr>()?.value());
                    Ok(())
                } else if meta.path.is_ident("class") {
                    attrs.class = true;
                    Ok(())
                } else {
                    Err(meta.error(
                        "unsupported introspect attribute; expected `skip`, `rename`, `encoding` or `class`",
                    ))
                }
            })?;
        }
        if attrs.class && attrs.encoding.is_some() {
            return Err(syn::Error::new(
                field.ty.span(),
                "`class` and `encoding` cannot be combined on one field",
            ));
        }
        Ok(attrs)
    }
}

/// Per-container context for picking field encodings.
struct Encoder<'a> {
    class_name: &'a str,
    type_params: Vec<Ident>,
}

impl Encoder<'_> {
    /// Pick the type encoding for a field type.
    fn encode_type(&self, ty: &Type) -> String {
        match ty {
            Type::Path(p) if p.qself.is_none() => self.encode_path(&p.path),
            Type::Reference(r) => self.encode_type(&r.elem),
            Type::Ptr(ptr) => {
                if is_c_char(&ptr.elem) {
                    return scalars::encoding_of(ScalarKind::CString).to_string();
                }
                match self.encode_type(&ptr.elem).as_str() {
                    // `^?` reads as a function pointer.
                    "?" => "^v".to_string(),
                    pointee => format!("^{pointee}"),
                }
            }
            Type::BareFn(_) => "^?".to_string(),
            Type::Tuple(t) if t.elems.is_empty() => "v".to_string(),
            Type::Tuple(t) => {
                let members: String = t.elems.iter().map(|elem| self.encode_type(elem)).collect();
                format!("{{?={members}}}")
            }
            Type::Array(a) => format!("[{}{}]", array_len(&a.len), self.encode_type(&a.elem)),
            Type::Slice(s) => format!("[0{}]", self.encode_type(&s.elem)),
            Type::TraitObject(_) | Type::ImplTrait(_) => "@".to_string(),
            Type::Paren(p) => self.encode_type(&p.elem),
            Type::Group(g) => self.encode_type(&g.elem),
            _ => "?".to_string(),
        }
    }

    fn encode_path(&self, path: &Path) -> String {
        let (Some(first), Some(last)) = (path.segments.first(), path.segments.last()) else {
            return "?".to_string();
        };
        if first.ident == "Self" {
            return match path.segments.len() {
                1 => format!("@\"{}\"", self.class_name),
                // Associated types are not known at expansion time.
                _ => "?".to_string(),
            };
        }
        if self.type_params.contains(&first.ident) {
            return "?".to_string();
        }
        let ident = last.ident.to_string();
        if let Some(kind) = scalars::from_rust_type(&ident) {
            return scalars::encoding_of(kind).to_string();
        }
        match ident.as_str() {
            "Box" | "Rc" | "Arc" | "Option" => first_type_arg(&last.arguments)
                .map(|inner| self.encode_type(inner))
                .unwrap_or_else(|| "?".to_string()),
            // No 128-bit scalar encoding exists.
            "i128" | "u128" => "?".to_string(),
            "str" => "@\"String\"".to_string(),
            _ => format!("@\"{ident}\""),
        }
    }
}

/// The type named by an `#[introspect(class)]` field, looking through references and `Box`/`Rc`/`Arc`/`Option`.
fn class_target(ty: &Type) -> &Type {
    match ty {
        Type::Reference(r) => class_target(&r.elem),
        Type::Paren(p) => class_target(&p.elem),
        Type::Group(g) => class_target(&g.elem),
        Type::Path(p) if p.qself.is_none() => {
            let wrapped = p.path.segments.last().and_then(|last| {
                matches!(last.ident.to_string().as_str(), "Box" | "Rc" | "Arc" | "Option")
                    .then(|| first_type_arg(&last.arguments))
                    .flatten()
            });
            wrapped.map_or(ty, class_target)
        }
        _ => ty,
    }
}

fn first_type_arg(arguments: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(args) = arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}

fn is_c_char(ty: &Type) -> bool {
    match ty {
        Type::Path(p) => p
            .path
            .segments
            .last()
            .is_some_and(|s| s.ident == "i8" || s.ident == "c_char"),
        _ => false,
    }
}

fn array_len(len: &Expr) -> String {
    match len {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Int(n) => n.base10_digits().to_string(),
            _ => "0".to_string(),
        },
        _ => "0".to_string(),
    }
}
