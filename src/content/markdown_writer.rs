use markdown::mdast::{AlignKind, Code, List, ListItem, Node, ReferenceKind, Table};

/// Writes a markdown tree back out as markdown text.
///
/// The output is normalized: blocks are separated by one blank line, headings are ATX,
/// emphasis and bullets use `*`, code blocks are always fenced and a front-matter node
/// is written back between its fences. Leading indentation of paragraphs is gone.
pub fn to_markdown(node: &Node) -> String {
    let mut out = flow(node);
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

fn flow(node: &Node) -> String {
    match node {
        Node::Root(root) => join_blocks(&root.children, "\n\n"),
        Node::Yaml(yaml) => fenced_front_matter("---", &yaml.value),
        Node::Toml(toml) => fenced_front_matter("+++", &toml.value),
        Node::Paragraph(paragraph) => phrasing(&paragraph.children),
        Node::Heading(heading) => {
            let marker = "#".repeat(heading.depth as usize);
            let text = phrasing(&heading.children);
            if text.is_empty() {
                marker
            } else {
                format!("{} {}", marker, text)
            }
        }
        Node::ThematicBreak(_) => "***".to_string(),
        Node::Blockquote(quote) => prefix_lines(&join_blocks(&quote.children, "\n\n"), "> ", ">"),
        Node::List(list) => list_items(list),
        Node::ListItem(item) => list_item(item, "*"),
        Node::Code(code) => fenced_code(code),
        Node::Math(math) => format!("$$\n{}\n$$", math.value),
        Node::Html(html) => html.value.clone(),
        Node::Definition(def) => format!(
            "[{}]: {}{}",
            label(&def.label, &def.identifier),
            destination(&def.url),
            title(&def.title)
        ),
        Node::FootnoteDefinition(def) => {
            let content = join_blocks(&def.children, "\n\n");
            format!("[^{}]: {}", label(&def.label, &def.identifier), indent_rest(&content, "    "))
        }
        Node::Table(table) => table_rows(table),
        other => inline(other),
    }
}

fn join_blocks(nodes: &[Node], separator: &str) -> String {
    nodes
        .iter()
        .map(flow)
        .filter(|block| !block.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn fenced_front_matter(fence: &str, value: &str) -> String {
    let value = value.trim_end_matches(['\r', '\n']);
    if value.is_empty() {
        format!("{}\n{}", fence, fence)
    } else {
        format!("{}\n{}\n{}", fence, value, fence)
    }
}

fn list_items(list: &List) -> String {
    let start = list.start.unwrap_or(1);
    let items: Vec<String> = list
        .children
        .iter()
        .enumerate()
        .map(|(idx, child)| {
            let marker = if list.ordered {
                format!("{}.", start + idx as u32)
            } else {
                "*".to_string()
            };
            match child {
                Node::ListItem(item) => list_item(item, &marker),
                other => flow(other),
            }
        })
        .collect();

    items.join(if list.spread { "\n\n" } else { "\n" })
}

fn list_item(item: &ListItem, marker: &str) -> String {
    let mut content = join_blocks(&item.children, if item.spread { "\n\n" } else { "\n" });
    if let Some(checked) = item.checked {
        content = format!("[{}] {}", if checked { "x" } else { " " }, content);
    }

    let indent = " ".repeat(marker.len() + 1);
    format!("{} {}", marker, indent_rest(&content, &indent)).trim_end().to_string()
}

fn fenced_code(code: &Code) -> String {
    let fence = "`".repeat(longest_run(&code.value, '`').max(2) + 1);
    let mut info = code.lang.clone().unwrap_or_default();
    if let Some(ref meta) = code.meta {
        info.push(' ');
        info.push_str(meta);
    }

    if code.value.is_empty() {
        format!("{}{}\n{}", fence, info, fence)
    } else {
        format!("{}{}\n{}\n{}", fence, info, code.value, fence)
    }
}

fn table_rows(table: &Table) -> String {
    let delimiter = table
        .align
        .iter()
        .map(|align| match align {
            AlignKind::Left => ":--",
            AlignKind::Right => "--:",
            AlignKind::Center => ":-:",
            AlignKind::None => "---",
        })
        .collect::<Vec<_>>()
        .join(" | ");

    let mut lines = vec![];
    for (idx, row) in table.children.iter().enumerate() {
        let cells: Vec<String> = match row {
            Node::TableRow(row) => row
                .children
                .iter()
                .map(|cell| match cell {
                    Node::TableCell(cell) => phrasing(&cell.children),
                    other => inline(other),
                })
                .collect(),
            other => vec![flow(other)],
        };
        lines.push(format!("| {} |", cells.join(" | ")));
        if idx == 0 {
            lines.push(format!("| {} |", delimiter));
        }
    }

    lines.join("\n")
}

fn phrasing(nodes: &[Node]) -> String {
    nodes.iter().map(inline).collect()
}

fn inline(node: &Node) -> String {
    match node {
        Node::Text(text) => text.value.clone(),
        Node::Emphasis(emphasis) => format!("*{}*", phrasing(&emphasis.children)),
        Node::Strong(strong) => format!("**{}**", phrasing(&strong.children)),
        Node::Delete(delete) => format!("~~{}~~", phrasing(&delete.children)),
        Node::InlineCode(code) => inline_code(&code.value),
        Node::InlineMath(math) => format!("${}$", math.value),
        Node::Break(_) => "\\\n".to_string(),
        Node::Html(html) => html.value.clone(),
        Node::Link(link) => {
            let text = phrasing(&link.children);
            if link.title.is_none() && text == link.url && link.url.contains(':') {
                format!("<{}>", link.url)
            } else {
                format!("[{}]({}{})", text, destination(&link.url), title(&link.title))
            }
        }
        Node::Image(image) => format!("![{}]({}{})", image.alt, destination(&image.url), title(&image.title)),
        Node::LinkReference(link) => format!(
            "[{}]{}",
            phrasing(&link.children),
            reference(&link.reference_kind, &link.label, &link.identifier)
        ),
        Node::ImageReference(image) => format!(
            "![{}]{}",
            image.alt,
            reference(&image.reference_kind, &image.label, &image.identifier)
        ),
        Node::FootnoteReference(note) => format!("[^{}]", label(&note.label, &note.identifier)),
        _ => String::new(),
    }
}

fn inline_code(value: &str) -> String {
    let ticks = "`".repeat(longest_run(value, '`') + 1);
    if value.starts_with('`') || value.ends_with('`') {
        format!("{} {} {}", ticks, value, ticks)
    } else {
        format!("{}{}{}", ticks, value, ticks)
    }
}

fn reference(kind: &ReferenceKind, label_text: &Option<String>, identifier: &str) -> String {
    match kind {
        ReferenceKind::Full => format!("[{}]", label(label_text, identifier)),
        ReferenceKind::Collapsed => "[]".to_string(),
        ReferenceKind::Shortcut => String::new(),
    }
}

fn label<'a>(label: &'a Option<String>, identifier: &'a str) -> &'a str {
    label.as_deref().unwrap_or(identifier)
}

fn destination(url: &str) -> String {
    if url.is_empty() || url.contains(char::is_whitespace) {
        format!("<{}>", url)
    } else {
        url.to_string()
    }
}

fn title(title: &Option<String>) -> String {
    match title {
        Some(title) => format!(" \"{}\"", title.replace('"', "\\\"")),
        None => String::new(),
    }
}

fn longest_run(text: &str, ch: char) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if c == ch {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

fn prefix_lines(text: &str, prefix: &str, empty_prefix: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                empty_prefix.to_string()
            } else {
                format!("{}{}", prefix, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn indent_rest(text: &str, indent: &str) -> String {
    let mut lines = text.lines();
    let mut out = lines.next().unwrap_or_default().to_string();
    for line in lines {
        out.push('\n');
        if !line.is_empty() {
            out.push_str(indent);
            out.push_str(line);
        }
    }
    out
}
