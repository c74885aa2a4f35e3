use serde::{Deserialize, Serialize};

/// One input slot of a Colormind request: either a fixed RGB seed the model
/// must keep, or a free slot (the literal string `"N"` on the wire) the model
/// fills in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaletteSlot {
    Rgb([u8; 3]),
    Free(String),
}

impl PaletteSlot {
    pub fn free() -> Self {
        Self::Free("N".to_string())
    }
}

/// Request body relayed to the Colormind API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteRequest {
    pub model: String,
    pub input: Vec<PaletteSlot>,
}

impl PaletteRequest {
    /// The catalog's fixed request: two warm seed colors, three free slots.
    pub fn seeded() -> Self {
        Self {
            model: "default".to_string(),
            input: vec![
                PaletteSlot::Rgb([44, 34, 44]),
                PaletteSlot::Rgb([90, 83, 82]),
                PaletteSlot::free(),
                PaletteSlot::free(),
                PaletteSlot::free(),
            ],
        }
    }
}

/// Response body: five RGB triples, in model order. No shape validation beyond
/// deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteResponse {
    pub result: Vec<[u8; 3]>,
}

/// CSS color string for a swatch background.
pub fn css_rgb(rgb: [u8; 3]) -> String {
    format!("rgb({}, {}, {})", rgb[0], rgb[1], rgb[2])
}

#[cfg(test)]
mod tests {
    use super::{PaletteRequest, PaletteResponse, PaletteSlot, css_rgb};

    #[test]
    fn seeded_request_serializes_to_colormind_wire_format() {
        let json = serde_json::to_string(&PaletteRequest::seeded()).expect("serialize request");
        assert_eq!(
            json,
            r#"{"model":"default","input":[[44,34,44],[90,83,82],"N","N","N"]}"#
        );
    }

    #[test]
    fn request_round_trips() {
        let request = PaletteRequest::seeded();
        let json = serde_json::to_string(&request).expect("serialize request");
        let parsed: PaletteRequest = serde_json::from_str(&json).expect("parse request");
        assert_eq!(parsed, request);
        assert_eq!(parsed.input[2], PaletteSlot::free());
    }

    #[test]
    fn response_preserves_model_order() {
        let parsed: PaletteResponse = serde_json::from_str(
            r#"{"result":[[1,2,3],[4,5,6],[7,8,9],[10,11,12],[13,14,15]]}"#,
        )
        .expect("parse response");
        assert_eq!(
            parsed.result,
            vec![
                [1, 2, 3],
                [4, 5, 6],
                [7, 8, 9],
                [10, 11, 12],
                [13, 14, 15]
            ]
        );
    }

    #[test]
    fn css_rgb_formats_swatch_color() {
        assert_eq!(css_rgb([44, 34, 44]), "rgb(44, 34, 44)");
    }
}
