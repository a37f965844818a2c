//! Integration tests for the tree builder.

use lintel_html::{NodeId, NodeKind, NodeType, ParseTree, parse};

/// Helper to parse HTML and render the debug form of the tree
fn render(html: &str) -> String {
    parse(html).to_string()
}

/// Helper to get the node types of a node's children
fn child_types(tree: &ParseTree, id: NodeId) -> Vec<NodeType> {
    tree.children(id).iter().map(|&child| tree.node(child).node_type()).collect()
}

#[test]
fn test_plain_text() {
    assert_eq!(render("hello"), "'hello'");
    assert_eq!(render(""), "");
}

#[test]
fn test_lone_ampersand_is_text() {
    assert_eq!(render("lone & ampersand"), "'lone ''&'' ampersand'");
}

#[test]
fn test_lone_gt_is_text() {
    assert_eq!(render("lone > gt"), "'lone ''>'' gt'");
}

#[test]
fn test_ampersand_inside_quoted_attribute() {
    assert_eq!(
        render(r#"<a href="http://example.com/foo?a=1&b=2"></a>"#),
        "<a href='http://example.com/foo?a=1&b=2'></a>"
    );
}

#[test]
fn test_attribute_without_value() {
    assert_eq!(render("<hr prop>"), "<hr prop=''>");
}

#[test]
fn test_multiple_quoted_attributes() {
    assert_eq!(
        render(r#"<br clear="right"  style="foo:bar">"#),
        "<br clear='right' style='foo:bar'>"
    );
}

#[test]
fn test_unquoted_and_single_quoted_values() {
    assert_eq!(render("<input value=foo>"), "<input value='foo'>");
    assert_eq!(render(r#"<img alt='say "hi"'>"#), r#"<img alt='say "hi"'>"#);
}

#[test]
fn test_attribute_names_are_lowercased() {
    assert_eq!(render("<IMG SRC='x.png'>"), "<img src='x.png'>");
}

#[test]
fn test_self_closing_void_tag() {
    assert_eq!(render("<hr />"), "<hr>");
    assert_eq!(render("<br/>text"), "<br>'text'");
}

#[test]
fn test_lone_closing_tag() {
    assert_eq!(render("</div>"), "</div>");
}

#[test]
fn test_element_with_text() {
    assert_eq!(render("<div>foo</div>"), "<div>'foo'</div>");
    assert_eq!(render("<DIV>foo</div>"), "<div>'foo'</div>");
}

#[test]
fn test_nested_elements() {
    assert_eq!(
        render("<ul><li>one</li><li>two</li></ul>"),
        "<ul><li>'one'</li><li>'two'</li></ul>"
    );
}

#[test]
fn test_comment() {
    assert_eq!(render("<!-- a -- b -->"), "<!-- a -- b -->");
}

#[test]
fn test_entities() {
    assert_eq!(render("&amp;&#x20AC;&#169;"), "&(amp);&(#x20AC);&(#169);");
}

#[test]
fn test_ampersand_without_reference_shape_does_not_panic() {
    assert_eq!(render("&C\n"), "'&''C\n'");
}

#[test]
fn test_entity_in_attribute_value_attaches_to_enclosing_element() {
    let tree = parse(r#"<p><img alt="&amp;"></p>"#);
    assert_eq!(tree.to_string(), "<p>&(amp);<img alt=''></p>");
}

#[test]
fn test_rawtext_body_is_text() {
    assert_eq!(
        render(r#"<script>if (a < b) { x = "</div>"; }</script>"#),
        r#"<script>'if (a ''<'' b) { x = "''</div>''"; }'</script>"#
    );
    assert_eq!(render("<STYLE>p{}</Style >"), "<style>'p{}'</style>");
}

#[test]
fn test_implicitly_closed_element_nests_under_closed_parent() {
    assert_eq!(render("<div><span>foo</div>"), "<div><span>'foo'</div>");
}

#[test]
fn test_unclosed_elements_are_closed_at_end() {
    let tree = parse("<div><p>text");
    assert_eq!(tree.to_string(), "<div><p>'text'");

    let div = tree.children(NodeId::ROOT)[0];
    assert_eq!(child_types(&tree, div), vec![NodeType::Tag]);
    assert_eq!(tree.closing_tag(div), None);
}

#[test]
fn test_tree_structure() {
    let tree = parse("<a href=x>hi</a><!--c-->");
    assert_eq!(child_types(&tree, NodeId::ROOT), vec![NodeType::Tag, NodeType::Comment]);

    let a = tree.children(NodeId::ROOT)[0];
    assert_eq!(tree.node(a).tag_name(), Some("a"));
    assert_eq!(tree.attributes(a).len(), 1);
    match tree.node(tree.attributes(a)[0]).kind() {
        NodeKind::Attr(data) => {
            assert_eq!(data.name, "href");
            assert_eq!(data.value, "x");
        }
        other => panic!("expected attribute, got {other:?}"),
    }

    let text = tree.last_child(a).expect("anchor has a text child");
    assert_eq!(tree.node(text).kind(), &NodeKind::Text("hi".to_string()));
    let closing = tree.closing_tag(a).expect("anchor is closed");
    assert_eq!(tree.node(closing).index_range(), Some((12, 15)));
}

#[test]
fn test_index_range_of_tag() {
    let tree = parse("ab<p class=x>");
    let p = tree.children(NodeId::ROOT)[1];
    assert_eq!(tree.node(p).index_range(), Some((2, 12)));
}

#[test]
fn test_parse_is_repeatable() {
    let html = "<div><b>bold</div></i>&nbsp;<script>x</script>";
    assert_eq!(parse(html), parse(html));
}
