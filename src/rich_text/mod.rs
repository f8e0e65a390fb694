use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
enum NodeType {
    Document,
    Paragraph,
    Text,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct BlockNode {
    node_type: NodeType,
    data: Map<String, Value>,
    content: Vec<Node>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct TextNode {
    node_type: NodeType,
    value: String,
    marks: Vec<Value>,
    data: Map<String, Value>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
enum Node {
    Block(BlockNode),
    Text(TextNode),
}

/// Wraps plain text in a rich-text document holding one paragraph.
pub(crate) fn paragraph_document(text: &str) -> Value {
    let text = Node::Text(TextNode {
        node_type: NodeType::Text,
        value: text.to_string(),
        marks: Vec::new(),
        data: Map::new(),
    });
    let paragraph = Node::Block(BlockNode {
        node_type: NodeType::Paragraph,
        data: Map::new(),
        content: vec![text],
    });
    let document = BlockNode {
        node_type: NodeType::Document,
        data: Map::new(),
        content: vec![paragraph],
    };

    // Plain structs of strings and maps always serialize.
    serde_json::to_value(document).unwrap_or(Value::Null)
}

/// Lines of a text node as rendered in the preview, one `<br>` between each.
pub(crate) fn text_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paragraph_document_shape() {
        assert_eq!(
            paragraph_document("Hello\nworld"),
            json!({
                "nodeType": "document",
                "data": {},
                "content": [{
                    "nodeType": "paragraph",
                    "data": {},
                    "content": [{
                        "nodeType": "text",
                        "value": "Hello\nworld",
                        "marks": [],
                        "data": {}
                    }]
                }]
            })
        );
    }

    #[test]
    fn test_text_lines_keeps_empty_lines() {
        assert_eq!(text_lines("a\n\nb"), vec!["a", "", "b"]);
        assert_eq!(text_lines(""), vec![""]);
    }
}
