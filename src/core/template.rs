//! Handlebars templates for entry and navigation markup.

use handlebars::Handlebars;
use serde_json::Value;

pub const DEFAULT_ENTRY_TEMPLATE: &str = r#"<a class="entry-link" href="{{link}}"><article class="entry"><h2>{{title}}</h2><p>{{contentSnippet}}</p></article></a>"#;

pub const DEFAULT_NAV_TEMPLATE: &str = r##"<li><a href="#" data-id="{{id}}">{{name}}</a></li>"##;

const TEMPLATE_NAME: &str = "template";

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("template does not compile: {0}")]
    Compile(#[from] Box<handlebars::TemplateError>),
    #[error("template failed to render: {0}")]
    Render(#[from] Box<handlebars::RenderError>),
}

/// One compiled template. Rendering takes any JSON record.
#[derive(Debug, Clone)]
pub struct Template {
    registry: Handlebars<'static>,
}

impl Template {
    pub fn compile(source: &str) -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry
            .register_template_string(TEMPLATE_NAME, source)
            .map_err(Box::new)?;
        Ok(Self { registry })
    }

    pub fn render(&self, data: &Value) -> Result<String, TemplateError> {
        Ok(self
            .registry
            .render(TEMPLATE_NAME, data)
            .map_err(Box::new)?)
    }
}

/// The entry and navigation-item templates used by the app.
#[derive(Debug, Clone)]
pub struct Templates {
    pub entry: Template,
    pub nav_item: Template,
}

impl Templates {
    pub fn compile(entry: &str, nav_item: &str) -> Result<Self, TemplateError> {
        Ok(Self {
            entry: Template::compile(entry)?,
            nav_item: Template::compile(nav_item)?,
        })
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self::compile(DEFAULT_ENTRY_TEMPLATE, DEFAULT_NAV_TEMPLATE).unwrap_or_else(|error| {
            panic!("built-in templates must compile: {error}");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(source: &str, data: Value) -> String {
        Template::compile(source)
            .expect("must compile")
            .render(&data)
            .expect("must render")
    }

    #[test]
    fn escapes_by_default_and_keeps_triple_stash_raw() {
        let rendered = render(
            "<h2>{{title}}</h2>{{{content}}}",
            json!({ "title": "Fish & <Chips>", "content": "<p>kept</p>" }),
        );
        assert_eq!(rendered, "<h2>Fish &amp; &lt;Chips&gt;</h2><p>kept</p>");
    }

    #[test]
    fn escapes_equals_and_backticks() {
        let rendered = render("{{title}}", json!({ "title": "a=b `c`" }));
        assert_eq!(rendered, "a&#x3D;b &#x60;c&#x60;");
    }

    #[test]
    fn block_helpers_and_comments_are_honoured() {
        let source = r#"{{! entry without a link }}{{#if link}}<a href="{{link}}">{{/if}}{{title}}"#;
        assert_eq!(render(source, json!({ "title": "plain" })), "plain");
        assert_eq!(
            render(source, json!({ "title": "linked", "link": "https://a/1" })),
            r#"<a href="https://a/1">linked"#
        );
    }

    #[test]
    fn missing_and_null_fields_render_empty() {
        let rendered = render("[{{a}}|{{b}}|{{c}}]", json!({ "b": null, "c": 3 }));
        assert_eq!(rendered, "[||3]");
    }

    #[test]
    fn dotted_names_walk_nested_objects() {
        let rendered = render("by {{author.name}}", json!({ "author": { "name": "Ada" } }));
        assert_eq!(rendered, "by Ada");
    }

    #[test]
    fn rejects_broken_templates() {
        assert!(matches!(
            Template::compile("ok {{title"),
            Err(TemplateError::Compile(_))
        ));
        assert!(matches!(
            Template::compile("{{#if title}}never closed"),
            Err(TemplateError::Compile(_))
        ));
    }

    #[test]
    fn unknown_helper_fails_at_render_time() {
        let template = Template::compile("{{shout title}}").expect("must compile");
        assert!(matches!(
            template.render(&json!({ "title": "x" })),
            Err(TemplateError::Render(_))
        ));
    }

    #[test]
    fn default_nav_template_carries_feed_id() {
        let rendered = Templates::default()
            .nav_item
            .render(&json!({ "id": 2, "name": "HTML5 Rocks", "url": "http://x" }))
            .expect("must render");
        assert_eq!(rendered, r##"<li><a href="#" data-id="2">HTML5 Rocks</a></li>"##);
    }
}
