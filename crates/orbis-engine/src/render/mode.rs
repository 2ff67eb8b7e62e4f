use std::fmt;
use std::str::FromStr;

/// Which content layers the compositor draws.
///
/// Read once at the start of every frame; there are no transitional states.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum RenderMode {
    HudOnly,
    WorldOnly,
    #[default]
    Both,
}

/// One of the two coexisting drawing spaces.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Layer {
    /// 3D content transformed by the orbit camera.
    World,
    /// Clip-space overlay drawn with the identity transform.
    Hud,
}

impl RenderMode {
    #[inline]
    pub fn draws_world(self) -> bool {
        matches!(self, RenderMode::WorldOnly | RenderMode::Both)
    }

    #[inline]
    pub fn draws_hud(self) -> bool {
        matches!(self, RenderMode::HudOnly | RenderMode::Both)
    }

    /// Active layers in draw order (world before HUD, so HUD overlays it).
    pub fn layers(self) -> impl Iterator<Item = Layer> {
        [
            self.draws_world().then_some(Layer::World),
            self.draws_hud().then_some(Layer::Hud),
        ]
        .into_iter()
        .flatten()
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RenderMode::HudOnly => "hud",
            RenderMode::WorldOnly => "world",
            RenderMode::Both => "both",
        })
    }
}

/// Error returned when a render mode name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRenderModeError(String);

impl fmt::Display for ParseRenderModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown render mode {:?} (expected hud, world or both)", self.0)
    }
}

impl std::error::Error for ParseRenderModeError {}

impl FromStr for RenderMode {
    type Err = ParseRenderModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hud" | "hud-only" | "2d" => Ok(RenderMode::HudOnly),
            "world" | "world-only" | "3d" => Ok(RenderMode::WorldOnly),
            "both" => Ok(RenderMode::Both),
            _ => Err(ParseRenderModeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_gating() {
        assert!(RenderMode::HudOnly.draws_hud() && !RenderMode::HudOnly.draws_world());
        assert!(RenderMode::WorldOnly.draws_world() && !RenderMode::WorldOnly.draws_hud());
        assert!(RenderMode::Both.draws_world() && RenderMode::Both.draws_hud());
    }

    #[test]
    fn both_orders_world_first() {
        let layers: Vec<_> = RenderMode::Both.layers().collect();
        assert_eq!(layers, vec![Layer::World, Layer::Hud]);
    }

    #[test]
    fn single_layer_modes() {
        assert_eq!(RenderMode::HudOnly.layers().collect::<Vec<_>>(), vec![Layer::Hud]);
        assert_eq!(RenderMode::WorldOnly.layers().collect::<Vec<_>>(), vec![Layer::World]);
    }

    #[test]
    fn parses_names() {
        assert_eq!("HUD".parse::<RenderMode>(), Ok(RenderMode::HudOnly));
        assert_eq!(" world ".parse::<RenderMode>(), Ok(RenderMode::WorldOnly));
        assert_eq!("both".parse::<RenderMode>(), Ok(RenderMode::Both));
        assert!("sideways".parse::<RenderMode>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for mode in [RenderMode::HudOnly, RenderMode::WorldOnly, RenderMode::Both] {
            assert_eq!(mode.to_string().parse::<RenderMode>(), Ok(mode));
        }
    }
}
