use proc_macro::TokenStream;
use quote::quote;
use syn::{parse::Parser, parse_macro_input, Data, DataStruct, DeriveInput, Fields, Meta};

/// 生成 Record trait 的实现
///
/// 自动生成 `TABLE`、`FIELDS` 常量和 `field_value` 方法。
/// 只有带 `#[column]` 标注的字段会映射到数据表列，其余字段保留在 `FIELDS` 中但没有列名。
///
/// 使用示例：
/// ```ignore
/// #[derive(Record)]
/// #[model(table = "skill")]
/// struct Skill {
///     #[column(name = "condition")]
///     condition: String,
///     #[column = "skill_type"]
///     skill_type: i64,
///     // 未标注：select/update/where 会跳过，insert 与 update_by_struct_strict 会报 MissingFieldTag
///     cache: String,
/// }
/// ```
#[proc_macro_derive(Record, attributes(model, column))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    // 解析 #[model(table = "...")]
    let mut table_name = None;
    for attr in &input.attrs {
        if attr.path().is_ident("model") {
            if let syn::Meta::List(list) = &attr.meta {
                let parser = syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated;
                if let Ok(metas) = parser.parse2(list.tokens.clone()) {
                    for meta in metas {
                        if let Meta::NameValue(nv) = meta {
                            if nv.path.is_ident("table") {
                                table_name = lit_str_value(&nv.value);
                            }
                        }
                    }
                }
            } else if let syn::Meta::NameValue(nv) = &attr.meta {
                table_name = lit_str_value(&nv.value);
            }
        }
    }

    // 如果没有指定表名，使用结构体名称的小写蛇形命名方式
    let table = table_name.unwrap_or_else(|| to_snake_case(&name.to_string()));

    // 获取字段列表（必须是具名字段的结构体）
    let fields = match &input.data {
        Data::Struct(DataStruct {
            fields: Fields::Named(fields),
            ..
        }) => &fields.named,
        _ => {
            return syn::Error::new_spanned(
                name,
                "Record derive only supports structs with named fields",
            )
            .to_compile_error()
            .into();
        }
    };

    let mut field_names: Vec<syn::LitStr> = Vec::new();
    let mut field_columns: Vec<proc_macro2::TokenStream> = Vec::new();
    // 只有已标注字段需要取值
    let mut tagged_idents: Vec<&syn::Ident> = Vec::new();
    let mut tagged_names: Vec<syn::LitStr> = Vec::new();

    for field in fields {
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };
        let field_name = syn::LitStr::new(&field_ident.to_string(), field_ident.span());

        let column = match parse_column(field) {
            Ok(column) => column,
            Err(err) => return err.to_compile_error().into(),
        };

        match column {
            Some(column) => {
                let col_lit = syn::LitStr::new(&column, proc_macro2::Span::call_site());
                field_columns.push(quote! { Some(#col_lit) });
                tagged_idents.push(field_ident);
                tagged_names.push(field_name.clone());
            }
            None => field_columns.push(quote! { None }),
        }
        field_names.push(field_name);
    }

    let expanded = quote! {
        impl sqlstmt::Record for #name {
            const TABLE: &'static str = #table;
            const FIELDS: &'static [sqlstmt::FieldMeta] = &[
                #(
                    sqlstmt::FieldMeta { name: #field_names, column: #field_columns },
                )*
            ];

            fn field_value(&self, name: &str) -> Option<sqlstmt::BindValue> {
                match name {
                    #(
                        #tagged_names => Some(sqlstmt::BindValue::from(
                            ::core::clone::Clone::clone(&self.#tagged_idents),
                        )),
                    )*
                    _ => None,
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// 解析字段上的 `#[column(name = "...")]` 或 `#[column = "..."]`
fn parse_column(field: &syn::Field) -> syn::Result<Option<String>> {
    for attr in &field.attrs {
        if !attr.path().is_ident("column") {
            continue;
        }
        match &attr.meta {
            syn::Meta::NameValue(nv) => {
                return lit_str_value(&nv.value)
                    .map(Some)
                    .ok_or_else(|| syn::Error::new_spanned(&nv.value, "expected a string literal"));
            }
            syn::Meta::List(list) => {
                let parser = syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated;
                let metas = parser.parse2(list.tokens.clone())?;
                for meta in metas {
                    if let Meta::NameValue(nv) = meta {
                        if nv.path.is_ident("name") {
                            return lit_str_value(&nv.value).map(Some).ok_or_else(|| {
                                syn::Error::new_spanned(&nv.value, "expected a string literal")
                            });
                        }
                    }
                }
                return Err(syn::Error::new_spanned(
                    list,
                    "expected #[column(name = \"...\")]",
                ));
            }
            syn::Meta::Path(path) => {
                return Err(syn::Error::new_spanned(
                    path,
                    "expected #[column(name = \"...\")] or #[column = \"...\"]",
                ));
            }
        }
    }
    Ok(None)
}

fn lit_str_value(expr: &syn::Expr) -> Option<String> {
    if let syn::Expr::Lit(syn::ExprLit {
        lit: syn::Lit::Str(s),
        ..
    }) = expr
    {
        Some(s.value())
    } else {
        None
    }
}

/// 将 PascalCase 转换为 snake_case
fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            result.push('_');
        }
        result.push(c.to_ascii_lowercase());
    }
    result
}
