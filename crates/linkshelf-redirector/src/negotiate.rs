/// The representations a not-found answer can be rendered in, in the order
/// they are offered to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    PlainText,
    Html,
    Json,
    JsonApi,
}

impl Representation {
    pub const OFFERS: [Representation; 4] = [
        Representation::PlainText,
        Representation::Html,
        Representation::Json,
        Representation::JsonApi,
    ];

    pub fn content_type(self) -> &'static str {
        match self {
            Representation::PlainText => "text/plain",
            Representation::Html => "text/html",
            Representation::Json => "application/json",
            Representation::JsonApi => "application/vnd.api+json",
        }
    }
}

struct MediaRange<'a> {
    kind: &'a str,
    subtype: &'a str,
    quality: f32,
}

impl<'a> MediaRange<'a> {
    fn parse(raw: &'a str) -> Option<Self> {
        let mut parts = raw.split(';');
        let (kind, subtype) = parts.next()?.trim().split_once('/')?;
        let (kind, subtype) = (kind.trim(), subtype.trim());
        if kind.is_empty() || subtype.is_empty() || (kind == "*" && subtype != "*") {
            return None;
        }

        let mut quality = 1.0;
        for param in parts {
            if let Some((name, value)) = param.split_once('=') {
                if name.trim().eq_ignore_ascii_case("q") {
                    quality = value.trim().parse::<f32>().ok()?.clamp(0.0, 1.0);
                }
            }
        }

        Some(Self {
            kind,
            subtype,
            quality,
        })
    }

    /// How precisely this range matches `content_type`: 3 for an exact
    /// match, 2 for `type/*`, 1 for `*/*`, `None` if it does not match.
    fn specificity(&self, content_type: &str) -> Option<u8> {
        let (kind, subtype) = content_type.split_once('/')?;
        if self.kind == "*" {
            return Some(1);
        }
        if !self.kind.eq_ignore_ascii_case(kind) {
            return None;
        }
        if self.subtype == "*" {
            return Some(2);
        }
        self.subtype.eq_ignore_ascii_case(subtype).then_some(3)
    }
}

/// Picks the representation a client prefers according to its `Accept`
/// header.
///
/// For every offer the most specific matching media range decides its
/// quality. The offer with the highest non-zero quality wins; ties go to the
/// more specific match, then to the earlier offer. Without a header, or when
/// nothing acceptable is offered, plain text is used.
pub fn negotiate(accept: Option<&str>) -> Representation {
    let Some(accept) = accept.filter(|a| !a.trim().is_empty()) else {
        return Representation::PlainText;
    };

    let ranges: Vec<MediaRange<'_>> = accept.split(',').filter_map(MediaRange::parse).collect();

    let mut best: Option<(Representation, f32, u8)> = None;
    for offer in Representation::OFFERS {
        let matched = ranges
            .iter()
            .filter_map(|range| {
                range
                    .specificity(offer.content_type())
                    .map(|specificity| (range.quality, specificity))
            })
            .max_by_key(|(_, specificity)| *specificity);

        let Some((quality, specificity)) = matched else {
            continue;
        };
        if quality <= 0.0 {
            continue;
        }

        let better = match best {
            None => true,
            Some((_, best_quality, best_specificity)) => {
                quality > best_quality
                    || (quality == best_quality && specificity > best_specificity)
            }
        };
        if better {
            best = Some((offer, quality, specificity));
        }
    }

    best.map_or(Representation::PlainText, |(offer, _, _)| offer)
}
