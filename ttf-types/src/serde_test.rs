use crate::{BoundingBox, GlyphId, Point, Tag};

#[test]
fn point_and_bbox_to_json() {
    let point = Point::new(3.5f32, -2.0);
    assert_eq!(
        serde_json::to_string(&point).unwrap(),
        r#"{"x":3.5,"y":-2.0}"#
    );
    let bbox = BoundingBox {
        x_min: -1,
        y_min: -2,
        x_max: 3,
        y_max: 4,
    };
    let json = serde_json::to_string(&bbox).unwrap();
    let de: BoundingBox<i16> = serde_json::from_str(&json).unwrap();
    assert_eq!(bbox, de);
}

#[test]
fn tag_is_a_string() {
    assert_eq!(serde_json::to_string(&Tag::new(b"glyf")).unwrap(), "\"glyf\"");
    assert_eq!(serde_json::to_string(&GlyphId::new(7)).unwrap(), "7");
}
