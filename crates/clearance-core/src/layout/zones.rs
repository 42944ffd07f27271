//! Vertical zoning of a page into per-item bands.

use super::anchors::Anchor;

/// Half-open vertical band `[start_y, end_y)` attributed to one item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    /// Inclusive upper edge.
    pub start_y: f64,
    /// Exclusive lower edge.
    pub end_y: f64,
    /// Owning item; `None` when no item has been seen yet in the document.
    pub item_id: Option<u32>,
}

impl Zone {
    /// Check if a vertical position falls inside the band.
    pub fn contains(&self, top: f64) -> bool {
        self.start_y <= top && top < self.end_y
    }

    /// Band height.
    pub fn height(&self) -> f64 {
        self.end_y - self.start_y
    }
}

/// Partition a page into zones.
///
/// `carried` is the last item seen on previous pages; it owns any text above
/// the first heading and whole pages without headings. Returns the zones and
/// the item to carry into the next page. The zones always tile
/// `[0, page_height)` without gaps or overlaps.
pub fn segment_page(
    anchors: &[Anchor],
    page_height: f64,
    carried: Option<u32>,
    top_epsilon: f64,
) -> (Vec<Zone>, Option<u32>) {
    if anchors.is_empty() {
        let zone = Zone {
            start_y: 0.0,
            end_y: page_height,
            item_id: carried,
        };
        return (vec![zone], carried);
    }

    let tops: Vec<f64> = anchors
        .iter()
        .map(|a| a.top.clamp(0.0, page_height))
        .collect();

    let mut zones = Vec::with_capacity(anchors.len() + 1);
    let leading = tops[0] > top_epsilon;
    if leading {
        zones.push(Zone {
            start_y: 0.0,
            end_y: tops[0],
            item_id: carried,
        });
    }

    for (i, anchor) in anchors.iter().enumerate() {
        // A heading hugging the page top absorbs the sliver above it.
        let start_y = if i == 0 && !leading { 0.0 } else { tops[i] };
        let end_y = tops.get(i + 1).copied().unwrap_or(page_height);
        zones.push(Zone {
            start_y,
            end_y,
            item_id: Some(anchor.item_number),
        });
    }

    (zones, anchors.last().map(|a| a.item_number))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEIGHT: f64 = 842.0;

    fn anchor(item_number: u32, top: f64) -> Anchor {
        Anchor { item_number, top }
    }

    fn assert_tiles(zones: &[Zone], height: f64) {
        assert_eq!(zones.first().map(|z| z.start_y), Some(0.0));
        assert_eq!(zones.last().map(|z| z.end_y), Some(height));
        for pair in zones.windows(2) {
            assert_eq!(pair[0].end_y, pair[1].start_y);
        }
    }

    #[test]
    fn test_page_without_anchors_is_carried() {
        let (zones, carried) = segment_page(&[], HEIGHT, Some(3), 10.0);
        assert_eq!(
            zones,
            vec![Zone { start_y: 0.0, end_y: HEIGHT, item_id: Some(3) }]
        );
        assert_eq!(carried, Some(3));
        assert_tiles(&zones, HEIGHT);
    }

    #[test]
    fn test_leading_zone_belongs_to_carried_item() {
        let anchors = [anchor(4, 150.0), anchor(5, 400.0)];
        let (zones, carried) = segment_page(&anchors, HEIGHT, Some(3), 10.0);
        assert_eq!(
            zones,
            vec![
                Zone { start_y: 0.0, end_y: 150.0, item_id: Some(3) },
                Zone { start_y: 150.0, end_y: 400.0, item_id: Some(4) },
                Zone { start_y: 400.0, end_y: HEIGHT, item_id: Some(5) },
            ]
        );
        assert_eq!(carried, Some(5));
        assert_tiles(&zones, HEIGHT);
    }

    #[test]
    fn test_first_page_leading_zone_has_no_item() {
        let anchors = [anchor(1, 200.0)];
        let (zones, carried) = segment_page(&anchors, HEIGHT, None, 10.0);
        assert_eq!(zones[0].item_id, None);
        assert_eq!(carried, Some(1));
        assert_tiles(&zones, HEIGHT);
    }

    #[test]
    fn test_anchor_near_top_extends_to_zero() {
        let anchors = [anchor(2, 8.0), anchor(3, 300.0)];
        let (zones, _) = segment_page(&anchors, HEIGHT, Some(1), 10.0);
        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0], Zone { start_y: 0.0, end_y: 300.0, item_id: Some(2) });
        assert_tiles(&zones, HEIGHT);
    }

    #[test]
    fn test_out_of_range_anchor_is_clamped() {
        let anchors = [anchor(1, 100.0), anchor(2, 900.0)];
        let (zones, _) = segment_page(&anchors, HEIGHT, None, 10.0);
        assert_tiles(&zones, HEIGHT);
        assert!(zones.iter().all(|z| z.height() >= 0.0));
    }

    #[test]
    fn test_zone_is_half_open() {
        let zone = Zone { start_y: 10.0, end_y: 20.0, item_id: None };
        assert!(zone.contains(10.0));
        assert!(zone.contains(19.99));
        assert!(!zone.contains(20.0));
    }
}
