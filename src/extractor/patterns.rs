//! Text-level heuristics for mining component metadata out of source artifacts.
//!
//! Nothing here parses the source language. Each helper looks for one literal
//! shape and gives up quietly when it is absent, so a record may come out with
//! fewer slots than the component really declares.

use crate::registry::{Category, InputSlot, OutputSlot, spaced_name};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// `class Name(Base, Other):`
static CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*class\s+(\w+)\s*(?:\(([^)]*)\))?\s*:").unwrap());

/// `@component` style decorator directly above a class.
static DECORATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*@(?:\w+\.)*component\b[^\n]*\n(?:[ \t]*@[^\n]*\n)*[ \t]*class\s+(\w+)")
        .unwrap()
});

/// Class-level metadata attributes.
static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]+(display_name|description|inputs|outputs)\s*(?::[^=\n]+)?=").unwrap()
});

static DISPLAY_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*display_name\s*(?::[^=\n]+)?=\s*[rf]?(?:"([^"\n]*)"|'([^'\n]*)')"#)
        .unwrap()
});

static DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*description\s*(?::[^=\n]+)?=\s*[rf]?(?:"([^"\n]*)"|'([^'\n]*)')"#)
        .unwrap()
});

/// Start of a field declaration: `name: Type = SomeInput(`, `name = SomeInput(` or `SomeInput(`.
static INPUT_CALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(class\s+)?(?:\b(\w+)\s*(?::\s*[\w.\[\]]+\s*)?=\s*)?\b(\w*Input)\s*\(").unwrap()
});

static OUTPUT_CALL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(class\s+)?\bOutput\s*\(").unwrap());

static BUILD_RETURN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"def\s+build\w*\s*\(\s*self[^)]*\)\s*->\s*([\w.\[\]]+)").unwrap()
});

static RETURN_CALL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"return\s+([A-Z]\w*)\(").unwrap());

static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:from\s+([\w.]+)\s+import|import\s+([\w.]+))").unwrap()
});

static STRING_LIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)"|'([^']+)'"#).unwrap());

const IGNORED_MODULES: [&str; 3] = ["typing", "os", "sys"];

/// Returns the name of the class that defines a component, if any.
///
/// Checked in order: a base class whose name contains `Component`, a
/// `@component` decorator, then any class when the file carries class-level
/// metadata attributes.
pub fn component_class(content: &str) -> Option<String> {
    for caps in CLASS_RE.captures_iter(content) {
        let bases = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        if bases
            .split(',')
            .any(|base| base.trim().rsplit('.').next().unwrap_or("").contains("Component"))
        {
            return Some(caps[1].to_string());
        }
    }

    if let Some(caps) = DECORATOR_RE.captures(content) {
        return Some(caps[1].to_string());
    }

    if ATTRIBUTE_RE.is_match(content) {
        return CLASS_RE.captures(content).map(|caps| caps[1].to_string());
    }

    None
}

/// The class body up to the first field list or method, where the class-level
/// literal attributes live.
fn class_header<'a>(content: &'a str, class_name: &str) -> &'a str {
    let start = CLASS_RE
        .captures_iter(content)
        .find(|c| &c[1] == class_name)
        .and_then(|c| c.get(0))
        .map(|m| m.end())
        .unwrap_or(0);
    let body = &content[start..];
    let end = ["inputs", "outputs", "def "]
        .iter()
        .filter_map(|marker| {
            body.match_indices(marker)
                .find(|(i, _)| line_prefix_is_blank(body, *i))
                .map(|(i, _)| i)
        })
        .min()
        .unwrap_or(body.len());
    &body[..end]
}

fn line_prefix_is_blank(text: &str, index: usize) -> bool {
    let line_start = text[..index].rfind('\n').map(|i| i + 1).unwrap_or(0);
    text[line_start..index].trim().is_empty()
}

pub fn display_name(content: &str, class_name: &str) -> String {
    DISPLAY_NAME_RE
        .captures(class_header(content, class_name))
        .and_then(|caps| quoted(&caps).map(|s| s.trim().to_string()))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| spaced_name(class_name))
}

/// Literal `description = "..."`, then the class docstring, then `"<name> component"`.
pub fn description(content: &str, class_name: &str) -> String {
    if let Some(caps) = DESCRIPTION_RE.captures(class_header(content, class_name)) {
        let text = quoted(&caps).unwrap_or("").trim();
        if !text.is_empty() {
            return text.to_string();
        }
    }
    if let Some(doc) = docstring(content, class_name) {
        return doc;
    }
    format!("{} component", class_name)
}

fn docstring(content: &str, class_name: &str) -> Option<String> {
    let pattern = format!(
        r#"class\s+{}\b[^\n]*:\s*[rub]?(?:"{{3}}((?s:.)*?)"{{3}}|'{{3}}((?s:.)*?)'{{3}}|"([^"\n]*)"|'([^'\n]*)')"#,
        regex::escape(class_name)
    );
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(content)?;
    let text = quoted(&caps)?.split_whitespace().collect::<Vec<_>>().join(" ");
    (!text.is_empty()).then_some(text)
}

/// The text inside whichever quote style matched.
fn quoted<'t>(caps: &regex::Captures<'t>) -> Option<&'t str> {
    caps.iter().skip(1).flatten().next().map(|m| m.as_str())
}

/// Collects the argument text of a call whose opening parenthesis ends at `open_end`.
fn call_arguments(content: &str, open_end: usize) -> &str {
    let mut depth = 1usize;
    let mut quote: Option<char> = None;
    for (offset, c) in content[open_end..].char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return &content[open_end..open_end + offset];
                    }
                }
                _ => {}
            },
        }
    }
    &content[open_end..]
}

fn keyword_string(args: &str, keyword: &str) -> Option<String> {
    let pattern = format!(
        r#"\b{}\s*=\s*[rf]?(?:"([^"]*)"|'([^']*)')"#,
        regex::escape(keyword)
    );
    let caps = Regex::new(&pattern).ok()?.captures(args)?;
    quoted(&caps).map(str::to_string)
}

fn keyword_list_first(args: &str, keyword: &str) -> Option<String> {
    let pattern = format!(r"\b{}\s*=\s*\[([^\]]*)\]", regex::escape(keyword));
    let list = Regex::new(&pattern).ok()?.captures(args)?;
    let caps = STRING_LIST_RE.captures(list.get(1)?.as_str())?;
    quoted(&caps).map(str::to_string)
}

fn keyword_is_true(args: &str, keyword: &str) -> bool {
    let pattern = format!(r"\b{}\s*=\s*True\b", regex::escape(keyword));
    Regex::new(&pattern).map(|re| re.is_match(args)).unwrap_or(false)
}

/// Maps an input field class onto the slot type it carries.
fn input_class_type(class_name: &str) -> String {
    let stem = class_name.strip_suffix("Input").unwrap_or(class_name);
    match stem {
        "Message" | "MessageText" => "Message".to_string(),
        "" | "Str" | "SecretStr" | "Multiline" | "MultilineSecret" | "Dropdown" | "Prompt"
        | "Multiselect" | "Query" | "Text" => "str".to_string(),
        "Bool" => "bool".to_string(),
        "Int" => "int".to_string(),
        "Float" | "Slider" => "float".to_string(),
        "File" => "file".to_string(),
        "Data" => "Data".to_string(),
        "Dict" | "NestedDict" => "dict".to_string(),
        other => other.to_string(),
    }
}

/// Extracts declared input slots in declaration order.
pub fn inputs(content: &str) -> Vec<InputSlot> {
    let mut slots: Vec<InputSlot> = Vec::new();
    for caps in INPUT_CALL_RE.captures_iter(content) {
        if caps.get(1).is_some() {
            continue;
        }
        let Some(whole) = caps.get(0) else { continue };
        let args = call_arguments(content, whole.end());
        let name = keyword_string(args, "name")
            .or_else(|| caps.get(2).map(|m| m.as_str().to_string()))
            .filter(|n| !n.is_empty());
        let Some(name) = name else { continue };
        if slots.iter().any(|s| s.name == name) {
            continue;
        }
        let type_name = keyword_list_first(args, "input_types")
            .unwrap_or_else(|| input_class_type(&caps[3]));
        slots.push(InputSlot {
            display_name: keyword_string(args, "display_name")
                .unwrap_or_else(|| title_case(&name)),
            required: keyword_is_true(args, "required"),
            name,
            type_name,
        });
    }
    slots
}

/// Extracts declared output slots.
///
/// `Output(...)` declarations take their type from `types=[...]` or from the
/// return annotation of the method they name. Files without any `Output(...)`
/// fall back to the build method's return annotation or returned constructors.
pub fn outputs(content: &str) -> Vec<OutputSlot> {
    let mut slots: Vec<OutputSlot> = Vec::new();
    for caps in OUTPUT_CALL_RE.captures_iter(content) {
        if caps.get(1).is_some() {
            continue;
        }
        let Some(whole) = caps.get(0) else { continue };
        let args = call_arguments(content, whole.end());
        let Some(name) = keyword_string(args, "name").filter(|n| !n.is_empty()) else {
            continue;
        };
        if slots.iter().any(|s| s.name == name) {
            continue;
        }
        let type_name = keyword_list_first(args, "types")
            .or_else(|| {
                keyword_string(args, "method")
                    .and_then(|method| method_return_type(content, &method))
            })
            .unwrap_or_else(|| "Data".to_string());
        slots.push(OutputSlot {
            display_name: keyword_string(args, "display_name")
                .unwrap_or_else(|| title_case(&name)),
            name,
            type_name,
        });
    }
    if !slots.is_empty() {
        return slots;
    }

    let mut types: Vec<String> = Vec::new();
    if let Some(caps) = BUILD_RETURN_RE.captures(content) {
        types.push(annotation_type(&caps[1]));
    } else {
        for caps in RETURN_CALL_RE.captures_iter(content) {
            let ty = caps[1].to_string();
            if !types.contains(&ty) {
                types.push(ty);
            }
        }
    }
    types
        .into_iter()
        .enumerate()
        .map(|(i, type_name)| {
            let name = if i == 0 {
                "output".to_string()
            } else {
                format!("output_{}", i)
            };
            OutputSlot {
                display_name: title_case(&name),
                name,
                type_name,
            }
        })
        .collect()
}

fn method_return_type(content: &str, method: &str) -> Option<String> {
    let pattern = format!(
        r"def\s+{}\s*\(\s*self[^)]*\)\s*->\s*([\w.\[\]]+)",
        regex::escape(method)
    );
    Regex::new(&pattern)
        .ok()?
        .captures(content)
        .map(|caps| annotation_type(&caps[1]))
}

/// `schema.Message` -> `Message`, `list[Data]` -> `Data`.
fn annotation_type(annotation: &str) -> String {
    let inner = match (annotation.find('['), annotation.rfind(']')) {
        (Some(open), Some(close)) if open < close => &annotation[open + 1..close],
        _ => annotation,
    };
    let first = inner.split(',').next().unwrap_or(inner).trim();
    first.rsplit('.').next().unwrap_or(first).to_string()
}

/// Top-level modules imported by the artifact, sorted and de-duplicated.
pub fn dependencies(content: &str) -> Vec<String> {
    let modules: BTreeSet<String> = IMPORT_RE
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str())
        .filter(|module| !module.starts_with('.') && !IGNORED_MODULES.contains(module))
        .filter_map(|module| module.split('.').next())
        .filter(|top| !top.is_empty() && !IGNORED_MODULES.contains(top))
        .map(str::to_string)
        .collect();
    modules.into_iter().collect()
}

/// Use-case tags implied by the category and by keywords in the artifact text.
pub fn use_cases(content: &str, category: Category) -> BTreeSet<String> {
    let by_category: &[&str] = match category {
        Category::InputOutput => &["chat", "user_interface", "data_input"],
        Category::Models => &["text_generation", "language_model", "ai_inference"],
        Category::Agents => &["autonomous_agent", "tool_usage", "reasoning"],
        Category::Data => &["data_processing", "file_handling", "web_scraping"],
        Category::Embeddings => &["semantic_search", "similarity", "vector_operations"],
        Category::VectorStores => &["vector_database", "similarity_search", "rag"],
        Category::Tools => &["external_apis", "calculations", "utilities"],
        Category::Processing => &["data_transformation", "text_processing", "parsing"],
        Category::Logic => &[],
    };
    let mut tags: BTreeSet<String> = by_category.iter().map(|s| s.to_string()).collect();

    let lowered = content.to_lowercase();
    if lowered.contains("chat") {
        tags.insert("chat".to_string());
    }
    if lowered.contains("search") {
        tags.insert("search".to_string());
    }
    if lowered.contains("document") || lowered.contains("pdf") {
        tags.insert("document_processing".to_string());
    }
    if lowered.contains("embedding") {
        tags.insert("embeddings".to_string());
    }
    tags
}

/// `input_value` -> `Input Value`.
fn title_case(identifier: &str) -> String {
    identifier
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
