use convert_case::Case;
use syn::{ItemStruct, LitStr, parse::ParseBuffer};

/// Case applied to the member names, from `#[rowcast(rename_all = "...")]`.
pub(crate) fn rename_rule(item: &ItemStruct) -> Option<Case> {
    let mut result = None;
    for attr in &item.attrs {
        if !attr.meta.path().is_ident("rowcast") {
            continue;
        }
        let Ok(list) = attr.meta.require_list() else {
            panic!(
                "Error while parsing `rowcast`, use it like: `#[rowcast(rename_all = \"PascalCase\")]`"
            );
        };
        let _ = list.parse_nested_meta(|arg| {
            if arg.path.is_ident("rename_all") {
                let Ok(v) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                    panic!(
                        "Error while parsing `rename_all`, use it like: `#[rowcast(rename_all = \"PascalCase\")]`"
                    );
                };
                result = Some(match v.value().as_str() {
                    "snake_case" => Case::Snake,
                    "camelCase" => Case::Camel,
                    "PascalCase" => Case::Pascal,
                    "SCREAMING_SNAKE_CASE" => Case::UpperSnake,
                    "kebab-case" => Case::Kebab,
                    "lowercase" => Case::Flat,
                    "UPPERCASE" => Case::UpperFlat,
                    other => panic!(
                        "Unknown case `{}`, expected one of: snake_case, camelCase, PascalCase, SCREAMING_SNAKE_CASE, kebab-case, lowercase, UPPERCASE",
                        other
                    ),
                });
            } else {
                panic!(
                    "Unknown attribute `{}` inside rowcast macro",
                    arg.path
                        .get_ident()
                        .map(ToString::to_string)
                        .unwrap_or_default()
                );
            }
            Ok(())
        });
    }
    result
}
