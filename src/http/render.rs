//! HTML rendering of views

use crate::view::{EntityView, ResourceLink, SearchHit, ViewNode, WIKIDATA_PROPERTY_PREFIX};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt::Write;

/// Characters left as-is in an entity path segment
const ENTITY_ID: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Escape text for HTML content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// URL of the entity page for a local id
pub fn entity_href(entity_id: &str) -> String {
    format!("/entity/{}", utf8_percent_encode(entity_id, ENTITY_ID))
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<link rel="stylesheet" href="/static/style.css">
</head>
<body>
<header><h3><a href="/">Knowledge graph</a></h3></header>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        body = body
    )
}

fn search_form(query: &str) -> String {
    format!(
        r#"<form class="search" method="get" action="/">
<input type="text" name="q" value="{}" placeholder="Search labels">
<input type="submit" value="Search">
</form>"#,
        escape(query)
    )
}

/// Start page: search form plus hits or the default listing
pub fn index_page(query: &str, hits: &[SearchHit]) -> String {
    let mut body = search_form(query);
    let heading = if query.trim().is_empty() {
        "Entities".to_string()
    } else {
        format!("Results for \u{201c}{}\u{201d}", escape(query.trim()))
    };
    let _ = write!(body, "\n<h1>{}</h1>\n", heading);

    if hits.is_empty() {
        body.push_str("<p>No entities found.</p>\n");
    } else {
        body.push_str("<ul class=\"hits\">\n");
        for hit in hits {
            let _ = writeln!(
                body,
                r#"<li><a href="{}">{}</a></li>"#,
                escape(&entity_href(&hit.entity_id)),
                escape(&hit.label)
            );
        }
        body.push_str("</ul>\n");
    }

    page("Knowledge graph", &body)
}

/// Entity detail page
pub fn entity_page(view: &EntityView) -> String {
    let mut body = format!(
        "<h1>{}</h1>\n<p class=\"identifier\"><code>{}</code></p>\n",
        escape(&view.label),
        escape(&view.identifier)
    );

    if !view.same_as.is_empty() {
        body.push_str("<p class=\"same-as\">Same as: ");
        let targets: Vec<String> = view
            .same_as
            .iter()
            .map(|s| {
                if s.resolvable {
                    format!(r#"<a class="external" href="{0}">{0}</a>"#, escape(&s.target))
                } else {
                    escape(&s.target)
                }
            })
            .collect();
        body.push_str(&targets.join(", "));
        body.push_str("</p>\n");
    }

    body.push_str("<table class=\"properties\">\n");
    for (property, values) in &view.properties {
        let class = if property.starts_with(WIKIDATA_PROPERTY_PREFIX) {
            " class=\"external\""
        } else {
            ""
        };
        let _ = write!(body, "<tr{}><th>{}</th><td>", class, escape(property));
        render_values(&mut body, values);
        body.push_str("</td></tr>\n");
    }
    body.push_str("</table>\n");

    if let Some(source) = &view.enriched_from {
        let _ = writeln!(
            body,
            "<p class=\"same-as\">Properties prefixed <code>{}</code> were fetched from Wikidata ({}).</p>",
            WIKIDATA_PROPERTY_PREFIX,
            escape(source)
        );
    }

    page(&view.label, &body)
}

/// Page for identifiers that resolve to nothing
pub fn not_found_page(entity_id: &str) -> String {
    page(
        "Not found",
        &format!(
            "<h1>Not found</h1>\n<p>No entity named <code>{}</code>.</p>\n<p><a href=\"/\">Back to the index</a></p>\n",
            escape(entity_id)
        ),
    )
}

fn render_values(out: &mut String, values: &[ViewNode]) {
    match values {
        [single] => render_node(out, single),
        _ => {
            out.push_str("<ul>");
            for value in values {
                out.push_str("<li>");
                render_node(out, value);
                out.push_str("</li>");
            }
            out.push_str("</ul>");
        }
    }
}

fn render_node(out: &mut String, node: &ViewNode) {
    match node {
        ViewNode::Circular => out.push_str("<span class=\"circular\">(circular reference)</span>"),
        ViewNode::Truncated => out.push_str("<span class=\"truncated\">(nested too deeply)</span>"),
        ViewNode::Literal { value } => out.push_str(&escape(value)),
        ViewNode::Resource { value, link } => {
            let _ = match link {
                ResourceLink::Internal { entity_id } => write!(
                    out,
                    r#"<a href="{}">{}</a>"#,
                    escape(&entity_href(entity_id)),
                    escape(value)
                ),
                ResourceLink::External { uri } => write!(
                    out,
                    r#"<a class="external" href="{}">{}</a>"#,
                    escape(uri),
                    escape(value)
                ),
            };
        }
        ViewNode::Blank { properties } => {
            out.push_str("<dl class=\"blank\">");
            for (property, values) in properties {
                let _ = write!(out, "<dt>{}</dt><dd>", escape(property));
                render_values(out, values);
                out.push_str("</dd>");
            }
            out.push_str("</dl>");
        }
    }
}
