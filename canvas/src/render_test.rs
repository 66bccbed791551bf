#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::doc::{BoardId, Position, Size};
use crate::factory;

fn board_with(items: Vec<Item>) -> Board {
    Board { id: BoardId(1), name: "Board 1".into(), items }
}

#[test]
fn dispatches_each_kind() {
    let image = factory::create_image("a.png", None);
    let text = factory::create_text(Some("<p>x</p>"));
    let video = factory::create_video("https://www.youtube.com/watch?v=dQw4w9WgXcQ");

    assert_eq!(render_item(&image, false).content, NodeContent::Image { src: "a.png".into() });
    assert_eq!(render_item(&text, false).content, NodeContent::Text { html: "<p>x</p>".into() });
    assert_eq!(
        render_item(&video, false).content,
        NodeContent::Video { embed_url: Some("https://www.youtube.com/embed/dQw4w9WgXcQ".into()) }
    );
}

#[test]
fn unresolvable_video_renders_empty_embed() {
    let video = factory::create_video("not a url");
    assert_eq!(render_item(&video, false).content, NodeContent::Video { embed_url: None });
}

#[test]
fn node_copies_geometry() {
    let mut item = factory::create_image("a.png", Some(Position::new(5.0, 6.0)));
    item.size = Size::new(70.0, 80.0);
    item.z_index = 9;
    let node = render_item(&item, true);
    assert_eq!((node.x, node.y, node.width, node.height), (5.0, 6.0, 70.0, 80.0));
    assert_eq!(node.z_index, 9);
    assert!(node.focused);
}

#[test]
fn board_renders_in_paint_order() {
    let mut top = factory::create_text(None);
    top.z_index = 5;
    let bottom = factory::create_text(None);
    let board = board_with(vec![top.clone(), bottom.clone()]);
    let nodes = render_board(&board, Some(top.id));
    let ids: Vec<ItemId> = nodes.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![bottom.id, top.id]);
    assert!(nodes[1].focused);
    assert!(!nodes[0].focused);
}

#[test]
fn empty_board_renders_nothing() {
    assert!(render_board(&board_with(Vec::new()), Some(Uuid::new_v4())).is_empty());
}

#[test]
fn node_content_serializes_with_type_tag() {
    let value = serde_json::to_value(NodeContent::Video { embed_url: None }).unwrap();
    assert_eq!(value, serde_json::json!({"type": "video", "embed_url": null}));
}
