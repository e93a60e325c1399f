//! Route templates for span names and metric labels.

use uuid::Uuid;

/// Replace UUID path segments with `{uuid}` so labels stay low-cardinality.
pub(super) fn route_template(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_segments_are_templated() {
        let path = format!("/orders/{}", Uuid::now_v7());

        assert_eq!(route_template(&path), "/orders/{uuid}");
        assert_eq!(route_template("/cart/size"), "/cart/size");
        assert_eq!(route_template("/"), "/");
    }
}
