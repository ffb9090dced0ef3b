//! Edge gluing for the board rectangle.
//!
//! Each edge is either blocked or glued to another edge, optionally with a
//! mirror. Gluing an edge to its opposite gives a cylinder/torus (or a Möbius
//! band / Klein bottle when mirrored); gluing it to an adjacent edge turns the
//! crossing into a quarter turn.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    North,
    East,
    South,
    West,
}

impl Edge {
    /// Directive order: north, east, south, west.
    pub const ALL: [Edge; 4] = [Edge::North, Edge::East, Edge::South, Edge::West];

    fn from_code(code: char) -> Option<Edge> {
        match code {
            'n' => Some(Edge::North),
            'e' => Some(Edge::East),
            's' => Some(Edge::South),
            'w' => Some(Edge::West),
            _ => None,
        }
    }

    fn code(self) -> char {
        match self {
            Edge::North => 'n',
            Edge::East => 'e',
            Edge::South => 's',
            Edge::West => 'w',
        }
    }

    /// The two edges this edge can be glued to: its opposite, and the one
    /// adjacent edge the transform knows how to turn onto.
    fn supported_links(self) -> [Edge; 2] {
        match self {
            Edge::North => [Edge::South, Edge::West],
            Edge::South => [Edge::North, Edge::East],
            Edge::East => [Edge::West, Edge::South],
            Edge::West => [Edge::East, Edge::North],
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Edge::North => "north",
            Edge::East => "east",
            Edge::South => "south",
            Edge::West => "west",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeLink {
    Blocked,
    Glued { to: Edge, mirrored: bool },
}

impl EdgeLink {
    /// Parses a two character directive such as `"s0"` or `"w1"` for `edge`.
    pub fn parse(edge: Edge, directive: &str) -> Result<EdgeLink, ConfigError> {
        let malformed = || ConfigError::MalformedDirective {
            edge,
            directive: directive.to_string(),
        };
        let mut chars = directive.chars();
        let (Some(target), Some(mirror), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(malformed());
        };
        let mirrored = match mirror {
            '0' => false,
            '1' => true,
            _ => return Err(malformed()),
        };
        if target == '0' {
            return if mirrored {
                Err(malformed())
            } else {
                Ok(EdgeLink::Blocked)
            };
        }
        let to = Edge::from_code(target).ok_or_else(malformed)?;
        if !edge.supported_links().contains(&to) {
            return Err(ConfigError::UnsupportedLink { edge, to });
        }
        Ok(EdgeLink::Glued { to, mirrored })
    }

    pub fn directive(self) -> String {
        match self {
            EdgeLink::Blocked => "00".to_string(),
            EdgeLink::Glued { to, mirrored } => {
                format!("{}{}", to.code(), if mirrored { '1' } else { '0' })
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Every edge blocked: an ordinary board.
    Bounded,
    /// Opposite edges glued straight.
    Torus,
    /// Opposite edges glued with a mirror.
    Mirrored,
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "n" => Ok(Preset::Bounded),
            "t" => Ok(Preset::Torus),
            "k" => Ok(Preset::Mirrored),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeConfig {
    pub north: EdgeLink,
    pub east: EdgeLink,
    pub south: EdgeLink,
    pub west: EdgeLink,
}

impl EdgeConfig {
    pub fn new(north: &str, east: &str, south: &str, west: &str) -> Result<Self, ConfigError> {
        let mut config = Self::preset(Preset::Bounded);
        for (edge, directive) in Edge::ALL.into_iter().zip([north, east, south, west]) {
            config = config.with_link(edge, EdgeLink::parse(edge, directive)?);
        }
        Ok(config)
    }

    pub fn preset(preset: Preset) -> Self {
        let glue = |to, mirrored| EdgeLink::Glued { to, mirrored };
        match preset {
            Preset::Bounded => Self {
                north: EdgeLink::Blocked,
                east: EdgeLink::Blocked,
                south: EdgeLink::Blocked,
                west: EdgeLink::Blocked,
            },
            Preset::Torus => Self {
                north: glue(Edge::South, false),
                east: glue(Edge::West, false),
                south: glue(Edge::North, false),
                west: glue(Edge::East, false),
            },
            Preset::Mirrored => Self {
                north: glue(Edge::South, true),
                east: glue(Edge::West, true),
                south: glue(Edge::North, true),
                west: glue(Edge::East, true),
            },
        }
    }

    pub fn link(&self, edge: Edge) -> EdgeLink {
        match edge {
            Edge::North => self.north,
            Edge::East => self.east,
            Edge::South => self.south,
            Edge::West => self.west,
        }
    }

    pub fn with_link(mut self, edge: Edge, link: EdgeLink) -> Self {
        match edge {
            Edge::North => self.north = link,
            Edge::East => self.east = link,
            Edge::South => self.south = link,
            Edge::West => self.west = link,
        }
        self
    }
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self::preset(Preset::Torus)
    }
}

/// Accepts a preset letter (`n`, `t`, `k`) or four comma separated
/// directives in north, east, south, west order.
impl FromStr for EdgeConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.contains(',') {
            return s.parse::<Preset>().map(EdgeConfig::preset);
        }
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        match parts.as_slice() {
            [north, east, south, west] => EdgeConfig::new(north, east, south, west),
            _ => Err(ConfigError::DirectiveCount(parts.len())),
        }
    }
}

impl fmt::Display for EdgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let directives: Vec<String> = Edge::ALL
            .into_iter()
            .map(|edge| self.link(edge).directive())
            .collect();
        f.write_str(&directives.join(","))
    }
}

/// Where a single step landed, with the axis flips and quarter turns the
/// crossing applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crossing {
    pub x: i32,
    pub y: i32,
    pub flip_x: bool,
    pub flip_y: bool,
    pub rotation: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Landed(Crossing),
    /// The step needs a blocked edge.
    Blocked,
    /// Resolution still left the board: the gluing does not fit these extents.
    Fault { x: i32, y: i32 },
}

/// Resolves the step from `(x, y)` to `(tx, ty)` on a `width` x `height`
/// board. Vertical overflow is resolved first, then horizontal overflow on
/// the already updated coordinate.
pub fn wrap(width: i32, height: i32, (x, y): (i32, i32), (tx, ty): (i32, i32), edges: &EdgeConfig) -> Step {
    let max_x = width - 1;
    let max_y = height - 1;
    let mut flip_x = false;
    let mut flip_y = false;
    let mut rotation: u8 = 0;
    let (mut nx, mut ny) = (tx, ty);

    if ny >= height {
        match edges.north {
            EdgeLink::Glued { to: Edge::South, mirrored } => {
                ny %= height;
                if mirrored {
                    flip_x = !flip_x;
                    nx = max_x - nx;
                }
            }
            EdgeLink::Glued { to: Edge::West, mirrored } => {
                rotation = (rotation + 1) % 4;
                if mirrored {
                    (nx, ny) = (ny % height, nx);
                } else {
                    flip_x = !flip_x;
                    (nx, ny) = (ny % height, max_x - nx);
                }
            }
            _ => return Step::Blocked,
        }
    } else if ny < 0 {
        match edges.south {
            EdgeLink::Glued { to: Edge::North, mirrored } => {
                ny += height;
                if mirrored {
                    flip_x = !flip_x;
                    nx = max_x - nx;
                }
            }
            EdgeLink::Glued { to: Edge::East, mirrored } => {
                rotation = (rotation + 1) % 4;
                if mirrored {
                    (nx, ny) = (height + ny, nx);
                } else {
                    flip_x = !flip_x;
                    (nx, ny) = (height + ny, max_x - nx);
                }
            }
            _ => return Step::Blocked,
        }
    }

    if nx >= width {
        match edges.east {
            EdgeLink::Glued { to: Edge::West, mirrored } => {
                nx %= width;
                if mirrored {
                    flip_y = !flip_y;
                    ny = max_y - ny;
                }
            }
            EdgeLink::Glued { to: Edge::South, mirrored } => {
                rotation = (rotation + 3) % 4;
                if mirrored {
                    flip_y = !flip_y;
                    (nx, ny) = (ny, nx % width);
                } else {
                    (nx, ny) = (max_y - ny, nx % width);
                }
            }
            _ => return Step::Blocked,
        }
    } else if nx < 0 {
        match edges.west {
            EdgeLink::Glued { to: Edge::East, mirrored } => {
                nx += width;
                if mirrored {
                    flip_y = !flip_y;
                    ny = max_y - ny;
                }
            }
            EdgeLink::Glued { to: Edge::North, mirrored } => {
                rotation = (rotation + 3) % 4;
                if mirrored {
                    (nx, ny) = (max_y - ny, width + nx);
                } else {
                    flip_y = !flip_y;
                    (nx, ny) = (ny % height, width + nx);
                }
            }
            _ => return Step::Blocked,
        }
    }

    if nx < 0 || nx >= width || ny < 0 || ny >= height {
        return Step::Fault { x: nx, y: ny };
    }
    if (nx, ny) == (x, y) {
        return Step::Blocked;
    }

    Step::Landed(Crossing {
        x: nx,
        y: ny,
        flip_x,
        flip_y,
        rotation,
    })
}
