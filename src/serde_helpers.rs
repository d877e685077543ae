use kurbo::{Point, Rect};
use serde::{ser::SerializeSeq as _, Deserialize as _};

pub(crate) fn zero_point() -> Point {
    Point::ZERO
}

pub(crate) fn zero_rect() -> Rect {
    Rect::ZERO
}

pub(crate) fn point_ser<S>(point: &Point, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let mut seq = serializer.serialize_seq(Some(2))?;
    seq.serialize_element(&point.x)?;
    seq.serialize_element(&point.y)?;
    seq.end()
}

pub(crate) fn point_de<'de, D>(deserializer: D) -> Result<Point, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let (x, y): (f64, f64) = <(f64, f64)>::deserialize(deserializer)?;
    Ok(Point::new(x, y))
}

// Stored as [x0, y0, x1, y1]
pub(crate) fn rect_ser<S>(rect: &Rect, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let mut seq = serializer.serialize_seq(Some(4))?;
    for value in [rect.x0, rect.y0, rect.x1, rect.y1] {
        seq.serialize_element(&value)?;
    }
    seq.end()
}

pub(crate) fn rect_de<'de, D>(deserializer: D) -> Result<Rect, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values: Vec<f64> = Vec::deserialize(deserializer)?;
    match values.as_slice() {
        [x0, y0, x1, y1] => Ok(Rect::new(*x0, *y0, *x1, *y1)),
        _ => Err(serde::de::Error::custom(format!(
            "Expected four rectangle coordinates, got {}",
            values.len()
        ))),
    }
}
