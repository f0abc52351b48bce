//! Identifier handling for emitted Rust: case conversion, keyword escaping
//! and collision mangling.

use std::collections::{HashMap, HashSet};

use heck::{ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use once_cell::sync::Lazy;
use protox_types::DescriptorProto;

/// Identifiers that cannot be used verbatim in emitted code: the Rust
/// keyword set plus the names the generated preamble itself occupies.
static RESERVED_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
        "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true",
        "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final",
        "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
        // names the generated preamble brings into scope
        "protox", "protox_types", "bytes", "define_fields", "Field", "FieldType", "EnumType",
        "MessageType", "ScalarKind", "Lazy",
    ]
    .into_iter()
    .collect()
});

pub(crate) fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.contains(name)
}

/// Converts to `lower_snake` case and escapes Rust keywords, for function
/// and module identifiers.
pub(crate) fn to_snake(name: &str) -> String {
    let ident = name.to_snake_case();
    if is_reserved(&ident) {
        format!("{ident}_")
    } else {
        ident
    }
}

/// Converts to `UpperCamel` case, for type identifiers.
pub(crate) fn to_upper_camel(name: &str) -> String {
    let ident = name.to_upper_camel_case();
    if ident == "Self" {
        format!("{ident}_")
    } else {
        ident
    }
}

/// Converts to `SHOUTY_SNAKE` case, for static identifiers.
pub(crate) fn to_shouty(name: &str) -> String {
    name.to_shouty_snake_case()
}

/// Renames the fields of one message under the `snake-case` option.
///
/// Every field converts to `lower_snake`; a converted name that hits a
/// reserved word, or that aliases a sibling field, takes a numeric suffix
/// chosen to avoid every existing sibling name.
pub(crate) struct FieldMangler {
    original_names: HashSet<String>,
    mangled: HashMap<String, String>,
}

impl FieldMangler {
    pub(crate) fn new(message: &DescriptorProto) -> FieldMangler {
        let original_names: HashSet<String> = message
            .fields()
            .iter()
            .map(|field| field.name().to_string())
            .collect();

        let mut mangler = FieldMangler {
            original_names,
            mangled: HashMap::new(),
        };
        for field in message.fields() {
            mangler.process(field.name());
        }
        mangler
    }

    fn process(&mut self, name: &str) {
        let snake = name.to_snake_case();

        let mangled = if is_reserved(&snake) || (snake != name && self.original_names.contains(&snake))
        {
            self.mangle(&snake)
        } else {
            snake
        };

        self.mangled.insert(name.to_string(), mangled);
    }

    fn mangle(&self, name: &str) -> String {
        let mut counter = 1usize;
        loop {
            let candidate = format!("{name}_{counter}");
            if !self.original_names.contains(&candidate)
                && !self.mangled.values().any(|taken| *taken == candidate)
            {
                return candidate;
            }
            counter += 1;
        }
    }

    /// The emitted name for a declared field.
    pub(crate) fn get<'a>(&'a self, field: &'a str) -> &'a str {
        match self.mangled.get(field) {
            Some(name) => name,
            None => field,
        }
    }
}
