//! Doclets - documentation extracted from `/** ... */` comments
//!
//! The parser understands the tags component docs use in practice:
//! `@name`, `@description`, `@param`, `@returns`/`@return`, `@example`,
//! `@access`, `@private`/`@public` and `@static`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocParam {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocReturns {
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doclet {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub params: Vec<DocParam>,
    #[serde(default)]
    pub returns: Option<DocReturns>,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default = "default_access")]
    pub access: String,
    #[serde(default, rename = "static")]
    pub is_static: bool,
}

fn default_access() -> String {
    "public".to_string()
}

/// Extract public doclets from source code
pub fn parse_docs(src: &str) -> Vec<Doclet> {
    let mut doclets = Vec::new();
    let mut rest = src;

    while let Some(start) = rest.find("/**") {
        let after_open = &rest[start + 3..];
        let Some(end) = after_open.find("*/") else {
            break;
        };
        let body = &after_open[..end];
        rest = &after_open[end + 2..];

        let declaration = rest.lines().map(str::trim).find(|line| !line.is_empty());
        if let Some(doclet) = parse_block(body, declaration) {
            if doclet.access != "private" {
                doclets.push(doclet);
            }
        }
    }

    doclets
}

fn parse_block(body: &str, declaration: Option<&str>) -> Option<Doclet> {
    let lines: Vec<&str> = body.lines().map(strip_comment_prefix).collect();

    let mut name = None;
    let mut description = Vec::new();
    let mut params = Vec::new();
    let mut returns = None;
    let mut examples: Vec<String> = Vec::new();
    let mut access = default_access();
    let mut is_static = false;
    let mut in_example = false;

    for line in lines {
        let trimmed = line.trim();
        if let Some(tag_line) = trimmed.strip_prefix('@') {
            in_example = false;
            let (tag, value) = tag_line
                .split_once(char::is_whitespace)
                .map(|(t, v)| (t, v.trim()))
                .unwrap_or((tag_line, ""));
            match tag {
                "name" => name = Some(value.to_string()),
                "description" | "desc" => description.push(value.to_string()),
                "param" | "arg" | "argument" => params.push(parse_param(value)),
                "returns" | "return" => {
                    let (type_name, rest) = split_type(value);
                    returns = Some(DocReturns {
                        type_name,
                        description: rest.to_string(),
                    });
                }
                "example" => {
                    in_example = true;
                    examples.push(value.to_string());
                }
                "access" => access = value.to_string(),
                "private" | "public" | "protected" => access = tag.to_string(),
                "static" => is_static = true,
                _ => {}
            }
        } else if in_example {
            if let Some(example) = examples.last_mut() {
                if !example.is_empty() {
                    example.push('\n');
                }
                example.push_str(line);
            }
        } else if !trimmed.is_empty() {
            description.push(trimmed.to_string());
        }
    }

    let name = name
        .filter(|n| !n.is_empty())
        .or_else(|| declaration.and_then(declared_name))?;

    Some(Doclet {
        name,
        description: description.join(" "),
        params,
        returns,
        examples: examples
            .into_iter()
            .map(|e| e.trim_end().to_string())
            .collect(),
        access,
        is_static,
    })
}

fn strip_comment_prefix(line: &str) -> &str {
    let trimmed = line.trim_start();
    match trimmed.strip_prefix('*') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => trimmed,
    }
}

/// Split a leading `{type}` from the rest of a tag value
fn split_type(value: &str) -> (Option<String>, &str) {
    if let Some(inner) = value.strip_prefix('{') {
        if let Some(close) = inner.find('}') {
            return (Some(inner[..close].trim().to_string()), inner[close + 1..].trim());
        }
    }
    (None, value)
}

fn parse_param(value: &str) -> DocParam {
    let (type_name, rest) = split_type(value);
    let (name, description) = rest
        .split_once(char::is_whitespace)
        .map(|(n, d)| (n, d.trim()))
        .unwrap_or((rest, ""));
    let description = description.strip_prefix('-').unwrap_or(description).trim();
    DocParam {
        name: name.to_string(),
        type_name,
        description: description.to_string(),
    }
}

/// Name declared by the line following a doc block, if recognizable
fn declared_name(line: &str) -> Option<String> {
    let line = line
        .trim_start_matches("export ")
        .trim_start_matches("default ")
        .trim_start_matches("async ");
    let candidate = ["function ", "const ", "let ", "var ", "class "]
        .iter()
        .find_map(|kw| line.strip_prefix(kw))
        .or_else(|| line.strip_prefix("module.exports."))
        .or_else(|| line.strip_prefix("exports."))?;
    let name: String = candidate
        .trim_start_matches('*')
        .trim_start()
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == '$')
        .collect();
    (!name.is_empty()).then_some(name)
}
