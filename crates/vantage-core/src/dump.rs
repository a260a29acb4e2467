//! Serialization of a workspace to Structurizr DSL text.
//!
//! The emitted text is the "diagram code" handed to an external renderer.
//! Formatting is fixed: four-space indentation, elements in insertion order,
//! one assignment per element so relationships and views can refer to
//! identifiers.

use indexmap::IndexMap;

use crate::element::{Element, ElementId, ElementKind};
use crate::identifier::IdentifierSet;
use crate::workspace::Workspace;

const INDENT: &str = "    ";

/// Writes Structurizr DSL with block tracking.
pub(crate) struct Dumper {
    out: String,
    depth: usize,
    identifiers: IndexMap<ElementId, String>,
    ids: IdentifierSet,
}

impl Dumper {
    pub(crate) fn new() -> Self {
        Dumper {
            out: String::new(),
            depth: 0,
            identifiers: IndexMap::new(),
            ids: IdentifierSet::new(),
        }
    }

    pub(crate) fn dump(mut self, workspace: &Workspace) -> String {
        self.open("workspace");

        self.open("model");
        let roots: Vec<_> = workspace
            .model()
            .roots()
            .map(|(id, _)| id)
            .collect();
        for id in roots {
            self.element(workspace, id);
        }
        for relationship in workspace.model().relationships() {
            let line = format!(
                "{} -> {}{}",
                self.identifier(relationship.source),
                self.identifier(relationship.destination),
                trailing_args(&[
                    relationship.description.as_deref(),
                    relationship.technology.as_deref(),
                    joined_tags(&relationship.tags).as_deref(),
                ]),
            );
            self.line(&line);
        }
        self.close();

        self.open("views");
        for view in workspace.views() {
            let header = format!(
                "{} {}{}",
                view.kind.keyword(),
                self.identifier(view.kind.target()),
                trailing_args(&[view.key.as_deref(), view.description.as_deref()]),
            );
            self.open(&header);
            self.line("include *");
            self.line("autoLayout");
            self.close();
        }
        if !workspace.styles().is_empty() {
            self.open("styles");
            for style in workspace.styles() {
                self.open(&format!("element {}", quoted(&style.tag)));
                if let Some(background) = &style.background {
                    self.line(&format!("background {background}"));
                }
                if let Some(color) = &style.color {
                    self.line(&format!("color {color}"));
                }
                if let Some(shape) = style.shape {
                    self.line(&format!("shape {}", shape.keyword()));
                }
                self.close();
            }
            self.close();
        }
        self.close();

        self.close();
        self.out
    }

    /// Emits one element and, recursively, its children.
    fn element(&mut self, workspace: &Workspace, id: ElementId) {
        let Some(element) = workspace.model().get(id) else {
            return;
        };
        let ident = self.ids.allocate(&element.name);
        self.identifiers.insert(id, ident.clone());

        let header = format!(
            "{ident} = {} {}{}",
            element.kind.keyword(),
            quoted(&element.name),
            trailing_args(&positional_args(element)),
        );

        let children: Vec<_> = workspace
            .model()
            .children_of(id)
            .map(|(child_id, _)| child_id)
            .collect();
        if children.is_empty() {
            self.line(&header);
        } else {
            self.open(&header);
            for child in children {
                self.element(workspace, child);
            }
            self.close();
        }
    }

    fn identifier(&self, id: ElementId) -> &str {
        self.identifiers
            .get(&id)
            .map(String::as_str)
            .unwrap_or("unknown")
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn open(&mut self, header: &str) {
        self.line(&format!("{header} {{"));
        self.depth += 1;
    }

    fn close(&mut self) {
        self.depth -= 1;
        self.line("}");
    }
}

/// Positional arguments after the name, per element kind.
///
/// People and software systems take `description tags`; containers and
/// components take `description technology tags`.
fn positional_args(element: &Element) -> Vec<Option<String>> {
    let tags = joined_tags(&element.tags);
    match element.kind {
        ElementKind::Person | ElementKind::SoftwareSystem => {
            vec![element.description.clone(), tags]
        }
        ElementKind::Container | ElementKind::Component => vec![
            element.description.clone(),
            element.technology.clone(),
            tags,
        ],
    }
}

fn joined_tags(tags: &[String]) -> Option<String> {
    if tags.is_empty() {
        None
    } else {
        Some(tags.join(","))
    }
}

/// Renders trailing positional arguments, quoting each and padding skipped
/// middle positions with `""`. Trailing absent positions are dropped.
fn trailing_args<S: AsRef<str>>(args: &[Option<S>]) -> String {
    let last_present = match args.iter().rposition(Option::is_some) {
        Some(index) => index,
        None => return String::new(),
    };

    let mut out = String::new();
    for arg in &args[..=last_present] {
        out.push(' ');
        out.push_str(&quoted(arg.as_ref().map(AsRef::as_ref).unwrap_or("")));
    }
    out
}

fn quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::element::{Container, Person, SoftwareSystem};
    use crate::relationship::Relationship;
    use crate::style::ElementStyle;
    use crate::view::View;

    fn sample_workspace() -> Workspace {
        let mut ws = Workspace::new("sample");
        let customer = ws
            .model_mut()
            .add_person(Person::new("Rich Customer"))
            .unwrap();
        let webapp = ws
            .model_mut()
            .add_software_system(SoftwareSystem::new("Fantastic Web App"))
            .unwrap();
        let frontend = ws
            .model_mut()
            .add_container(webapp, Container::new("Smooth UI").technology("React"))
            .unwrap();
        ws.model_mut()
            .add_relationship(
                Relationship::new(customer, frontend)
                    .description("Uses")
                    .technology("HTTPS"),
            )
            .unwrap();
        ws.add_view(View::container(webapp)).unwrap();
        ws
    }

    #[test]
    fn dumps_nested_elements() {
        let code = sample_workspace().dump();
        assert!(code.contains("rich_customer = person \"Rich Customer\"\n"));
        assert!(code.contains("fantastic_web_app = softwareSystem \"Fantastic Web App\" {\n"));
        assert!(code.contains("smooth_ui = container \"Smooth UI\" \"\" \"React\"\n"));
    }

    #[test]
    fn dumps_relationship_with_padded_description() {
        let code = sample_workspace().dump();
        assert!(code.contains("rich_customer -> smooth_ui \"Uses\" \"HTTPS\"\n"));
    }

    #[test]
    fn dumps_view_with_derived_key() {
        let code = sample_workspace().dump();
        assert!(code.contains("container fantastic_web_app \"fantastic_web_app_containers\" {\n"));
        assert!(code.contains("include *"));
        assert!(code.contains("autoLayout"));
    }

    #[test]
    fn dumps_styles_block() {
        let mut ws = sample_workspace();
        ws.add_style(
            ElementStyle::tag("external")
                .background("#807f7e")
                .unwrap()
                .color("#ffffff")
                .unwrap(),
        );
        let code = ws.dump();
        assert!(code.contains("element \"external\" {\n"));
        assert!(code.contains("background #807f7e"));
        assert!(code.contains("color #ffffff"));
    }

    #[test]
    fn empty_workspace_is_still_valid() {
        let code = Workspace::new("empty").dump();
        assert_eq!(
            code,
            "workspace {\n    model {\n    }\n    views {\n    }\n}\n"
        );
    }

    #[test]
    fn quotes_are_escaped() {
        let mut ws = Workspace::new("q");
        ws.model_mut()
            .add_person(Person::new("The \"Boss\""))
            .unwrap();
        let code = ws.dump();
        assert!(code.contains("the_boss = person \"The \\\"Boss\\\"\"\n"));
    }
}
