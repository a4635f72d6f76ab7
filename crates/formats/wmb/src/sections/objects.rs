use glam::{Vec3, Vec4};

use crate::coords::CoordinateMapper;
use crate::cursor::Cursor;
use crate::directory::Section;
use crate::error::{Error, Result};
use crate::warning::{Diagnostics, Warning};

/// Object type tags as stored in front of every object record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectTag {
    Position,
    Light,
    OldEntity,
    Sound,
    Environment,
    Path,
    Entity,
    Region,
}

impl ObjectTag {
    pub fn from_u32(tag: u32) -> Option<Self> {
        match tag {
            1 => Some(Self::Position),
            2 => Some(Self::Light),
            3 => Some(Self::OldEntity),
            4 => Some(Self::Sound),
            5 => Some(Self::Environment),
            6 => Some(Self::Path),
            7 => Some(Self::Entity),
            8 => Some(Self::Region),
            _ => None,
        }
    }
}

/// Euler angles in degrees, as stored.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Euler {
    pub pan: f32,
    pub tilt: f32,
    pub roll: f32,
}

impl Euler {
    fn read(c: &mut Cursor<'_>) -> Result<Self> {
        let [pan, tilt, roll] = c.read_f32_array()?;
        Ok(Self { pan, tilt, roll })
    }
}

/// Lightmap resolutions selectable in the environment record.
const LIGHTMAP_SIZES: [u32; 3] = [256, 512, 1024];

/// Global lighting parameters. Each level has exactly one.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    /// Sun azimuth in degrees.
    pub azimuth: f32,
    /// Sun elevation in degrees.
    pub elevation: f32,
    /// Light level at black, 0..=1.
    pub gamma: f32,
    /// Edge length of every block lightmap in pixels.
    pub lightmap_size: u32,
    /// RGBA, 0..=1.
    pub sun_color: Vec4,
    pub ambient_color: Vec4,
    pub fog_colors: [Vec4; 4],
    /// Version of the compiler that wrote the file.
    pub compiler_version: f32,
}

/// Decode an ARGB color word.
fn argb(v: u32) -> Vec4 {
    let [b, g, r, a] = v.to_le_bytes();
    Vec4::new(r as f32, g as f32, b as f32, a as f32) / 255.0
}

/// A named marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub name: String,
    pub origin: Vec3,
    pub angle: Euler,
}

/// A static or dynamic light.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub origin: Vec3,
    /// Color in percent, 0..=100 per channel.
    pub color: Vec3,
    pub range: f32,
    pub flags: u32,
}

impl Light {
    pub fn is_high_res(&self) -> bool {
        self.flags & 1 != 0
    }

    pub fn is_dynamic(&self) -> bool {
        self.flags & (1 << 1) != 0
    }

    pub fn is_static(&self) -> bool {
        self.flags & (1 << 2) != 0
    }

    pub fn casts_shadow(&self) -> bool {
        self.flags & (1 << 3) != 0
    }
}

/// An ambient sound source.
#[derive(Debug, Clone, PartialEq)]
pub struct Sound {
    pub origin: Vec3,
    pub volume: f32,
    pub range: u32,
    pub flags: u32,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathNode {
    pub position: Vec3,
    pub skills: [f32; 6],
}

/// A connection between two nodes of the same path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathEdge {
    /// 0-based index into the path's nodes.
    pub node1: usize,
    /// 0-based index into the path's nodes, never equal to `node1`.
    pub node2: usize,
    pub length: f32,
    pub bezier: f32,
    pub weight: f32,
    pub skill: f32,
}

/// A navigation path.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub name: String,
    pub nodes: Vec<PathNode>,
    pub edges: Vec<PathEdge>,
}

/// A placed model, sprite or terrain.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Read from the pre-A7 entity record, which lacks material, strings,
    /// albedo, attachments and skills 9..20.
    pub is_legacy: bool,
    pub origin: Vec3,
    pub angle: Euler,
    pub scale: Vec3,
    pub name: String,
    pub file_name: String,
    pub action: String,
    pub skills: [f32; 20],
    pub flags: u32,
    pub ambient: f32,
    pub albedo: f32,
    /// 0-based index of the attached path among the level's paths.
    pub path: Option<u32>,
    /// 0-based index of the attached entity.
    pub attached_entity: Option<u32>,
    pub material: String,
    pub string1: String,
    pub string2: String,
}

impl Entity {
    pub const INVISIBLE: u32 = 8;
    pub const PASSABLE: u32 = 9;
    pub const TRANSLUCENT: u32 = 10;
    pub const OVERLAY: u32 = 12;
    pub const SPOTLIGHT: u32 = 13;
    pub const ZNEAR: u32 = 14;
    pub const NOFILTER: u32 = 16;
    pub const UNLIT: u32 = 17;
    pub const SHADOW: u32 = 18;
    pub const LIGHT: u32 = 19;
    pub const NOFOG: u32 = 20;
    pub const BRIGHT: u32 = 21;
    /// Shared with METAL.
    pub const DECAL: u32 = 22;
    pub const CAST: u32 = 23;
    pub const POLYGON: u32 = 26;

    /// Whether bit `bit` of the flags word is set.
    pub fn flag(&self, bit: u32) -> bool {
        bit < 32 && self.flags & (1 << bit) != 0
    }

    /// User flag FLAG1..FLAG8 (`n` in 1..=8).
    pub fn user_flag(&self, n: u32) -> bool {
        (1..=8).contains(&n) && self.flag(n - 1)
    }

    pub fn is_invisible(&self) -> bool {
        self.flag(Self::INVISIBLE)
    }

    pub fn is_passable(&self) -> bool {
        self.flag(Self::PASSABLE)
    }

    pub fn is_translucent(&self) -> bool {
        self.flag(Self::TRANSLUCENT)
    }

    pub fn is_overlay(&self) -> bool {
        self.flag(Self::OVERLAY)
    }

    pub fn is_spotlight(&self) -> bool {
        self.flag(Self::SPOTLIGHT)
    }

    pub fn is_znear(&self) -> bool {
        self.flag(Self::ZNEAR)
    }

    /// Point filtering.
    pub fn is_nofilter(&self) -> bool {
        self.flag(Self::NOFILTER)
    }

    /// No light from the environment.
    pub fn is_unlit(&self) -> bool {
        self.flag(Self::UNLIT)
    }

    /// Casts dynamic shadows.
    pub fn casts_shadow(&self) -> bool {
        self.flag(Self::SHADOW)
    }

    /// Tinted by its own light color.
    pub fn is_light(&self) -> bool {
        self.flag(Self::LIGHT)
    }

    pub fn is_nofog(&self) -> bool {
        self.flag(Self::NOFOG)
    }

    /// Additive blending.
    pub fn is_bright(&self) -> bool {
        self.flag(Self::BRIGHT)
    }

    /// Sprite without backside, or metal material on models.
    pub fn is_decal(&self) -> bool {
        self.flag(Self::DECAL)
    }

    /// Does not receive shadows.
    pub fn is_cast(&self) -> bool {
        self.flag(Self::CAST)
    }

    /// Polygonal collision detection.
    pub fn is_polygon(&self) -> bool {
        self.flag(Self::POLYGON)
    }
}

/// A named box volume.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: String,
    pub min: Vec3,
    pub max: Vec3,
}

/// Kind of a placed object, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Position,
    Light,
    Sound,
    Path,
    Entity,
    Region,
}

/// A placed scene object.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Position(Position),
    Light(Light),
    Sound(Sound),
    Path(Path),
    Entity(Entity),
    Region(Region),
}

impl Object {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Position(_) => ObjectKind::Position,
            Self::Light(_) => ObjectKind::Light,
            Self::Sound(_) => ObjectKind::Sound,
            Self::Path(_) => ObjectKind::Path,
            Self::Entity(_) => ObjectKind::Entity,
            Self::Region(_) => ObjectKind::Region,
        }
    }
}

/// Parsed objects section.
#[derive(Debug, Default)]
pub struct Objects {
    /// The first environment record, if any.
    pub environment: Option<Environment>,
    /// Every other object, in file order.
    pub objects: Vec<Object>,
}

impl Objects {
    /// Parse the objects section.
    ///
    /// `data` is the full file; object offsets are relative to the section start.
    pub(crate) fn parse(
        data: &[u8],
        section: Section,
        mapper: &CoordinateMapper,
        diag: &mut Diagnostics,
    ) -> Result<Self> {
        let mut c = Cursor::new(data);
        c.seek(section.start())?;
        let offsets = c.read_offset_list()?;

        let mut parsed = Self::default();
        parsed.objects.reserve(offsets.len());
        for rel in offsets {
            let offset = section.start().saturating_add(rel as usize);
            let mut oc = c.at_offset(offset)?;
            let tag = oc.read_u32()?;
            let kind = ObjectTag::from_u32(tag).ok_or(Error::UnknownObjectType { offset, tag })?;

            let object = match kind {
                ObjectTag::Environment => {
                    let environment = parse_environment(&mut oc)?;
                    if parsed.environment.is_some() {
                        diag.warn(Warning::DuplicateEnvironment { offset });
                    } else {
                        parsed.environment = Some(environment.resolve()?);
                    }
                    continue;
                }
                ObjectTag::Position => Object::Position(parse_position(&mut oc, mapper)?),
                ObjectTag::Light => Object::Light(parse_light(&mut oc, mapper)?),
                ObjectTag::Sound => Object::Sound(parse_sound(&mut oc, mapper)?),
                ObjectTag::Path => Object::Path(parse_path(&mut oc, mapper, diag)?),
                ObjectTag::Entity => Object::Entity(parse_entity(&mut oc, mapper)?),
                ObjectTag::OldEntity => Object::Entity(parse_old_entity(&mut oc, mapper)?),
                ObjectTag::Region => Object::Region(parse_region(&mut oc, mapper)?),
            };
            parsed.objects.push(object);
        }

        log::debug!("[wmb] objects: {}", parsed.objects.len());
        Ok(parsed)
    }
}

/// Environment record before its lightmap size selector is resolved.
struct RawEnvironment {
    environment: Environment,
    selector: u8,
}

impl RawEnvironment {
    fn resolve(mut self) -> Result<Environment> {
        self.environment.lightmap_size = *LIGHTMAP_SIZES
            .get(self.selector as usize)
            .ok_or(Error::InvalidLightmapSize {
                selector: self.selector,
            })?;
        Ok(self.environment)
    }
}

fn parse_environment(c: &mut Cursor<'_>) -> Result<RawEnvironment> {
    let _origin = c.read_vec3()?;
    let azimuth = c.read_f32()?;
    let elevation = c.read_f32()?;
    let _flags = c.read_u32()?;
    let compiler_version = c.read_f32()?;
    let gamma = c.read_u8()?;
    let selector = c.read_u8()?;
    c.skip(8)?;
    let sun_color = argb(c.read_u32()?);
    let ambient_color = argb(c.read_u32()?);
    let mut fog_colors = [Vec4::ZERO; 4];
    for fog in &mut fog_colors {
        *fog = argb(c.read_u32()?);
    }

    Ok(RawEnvironment {
        environment: Environment {
            azimuth,
            elevation,
            gamma: f32::from(gamma) / 255.0,
            lightmap_size: 0,
            sun_color,
            ambient_color,
            fog_colors,
            compiler_version,
        },
        selector,
    })
}

fn parse_position(c: &mut Cursor<'_>, mapper: &CoordinateMapper) -> Result<Position> {
    let origin = mapper.position(c.read_vec3()?);
    let angle = Euler::read(c)?;
    c.skip(8)?;
    let name = c.read_fixed_str(20)?;
    Ok(Position {
        name,
        origin,
        angle,
    })
}

fn parse_light(c: &mut Cursor<'_>, mapper: &CoordinateMapper) -> Result<Light> {
    Ok(Light {
        origin: mapper.position(c.read_vec3()?),
        color: c.read_vec3()?,
        range: c.read_f32()?,
        flags: c.read_u32()?,
    })
}

fn parse_sound(c: &mut Cursor<'_>, mapper: &CoordinateMapper) -> Result<Sound> {
    let origin = mapper.position(c.read_vec3()?);
    let volume = c.read_f32()?;
    c.skip(8)?;
    let range = c.read_u32()?;
    let flags = c.read_u32()?;
    let file_name = c.read_fixed_str(33)?;
    Ok(Sound {
        origin,
        volume,
        range,
        flags,
        file_name,
    })
}

fn parse_path(
    c: &mut Cursor<'_>,
    mapper: &CoordinateMapper,
    diag: &mut Diagnostics,
) -> Result<Path> {
    let name = c.read_fixed_str(20)?;
    // The node count is stored as a float; `as` truncates and clamps negatives and NaN to 0.
    let node_count = c.read_f32()? as usize;
    c.skip(12)?;
    let edge_count = c.read_u32()? as usize;

    // Each node needs 36 bytes: a position block entry and a skill block entry.
    let mut nodes = Vec::with_capacity(node_count.min(c.remaining() / 36));
    for _ in 0..node_count {
        nodes.push(PathNode {
            position: mapper.position(c.read_vec3()?),
            skills: [0.0; 6],
        });
    }
    // Skills follow all positions as a second block.
    for node in &mut nodes {
        node.skills = c.read_f32_array()?;
    }

    let limit = nodes.len() as f32;
    let mut edges = Vec::with_capacity(edge_count.min(c.remaining() / 24));
    for _ in 0..edge_count {
        let [node1, node2, length, bezier, weight, skill] = c.read_f32_array()?;

        // Node numbers start at 1. The negated range check also rejects NaN.
        let in_range = |n: f32| n >= 1.0 && n <= limit;
        if !in_range(node1) || !in_range(node2) || node1 as usize == node2 as usize {
            diag.warn(Warning::InvalidPathEdge {
                path: name.clone(),
                node1,
                node2,
            });
            continue;
        }

        edges.push(PathEdge {
            node1: node1 as usize - 1,
            node2: node2 as usize - 1,
            length,
            bezier,
            weight,
            skill,
        });
    }

    Ok(Path { name, nodes, edges })
}

/// Map a 1-based file reference to a 0-based index, with 0 meaning none.
fn one_based(v: i64) -> Option<u32> {
    if v > 0 {
        u32::try_from(v - 1).ok()
    } else {
        None
    }
}

fn parse_entity(c: &mut Cursor<'_>, mapper: &CoordinateMapper) -> Result<Entity> {
    let origin = mapper.position(c.read_vec3()?);
    let angle = Euler::read(c)?;
    let scale = mapper.scale(c.read_vec3()?);
    let name = c.read_fixed_str(33)?;
    let file_name = c.read_fixed_str(33)?;
    let action = c.read_fixed_str(33)?;
    c.skip(1)?;
    let skills = c.read_f32_array()?;
    let flags = c.read_u32()?;
    let ambient = c.read_f32()?;
    let albedo = c.read_f32()?;
    let path = one_based(i64::from(c.read_i32()?));
    let attached_entity = one_based(i64::from(c.read_u32()?));
    let material = c.read_fixed_str(33)?;
    let string1 = c.read_fixed_str(33)?;
    let string2 = c.read_fixed_str(33)?;
    c.skip(33)?;

    Ok(Entity {
        is_legacy: false,
        origin,
        angle,
        scale,
        name,
        file_name,
        action,
        skills,
        flags,
        ambient,
        albedo,
        path,
        attached_entity,
        material,
        string1,
        string2,
    })
}

fn parse_old_entity(c: &mut Cursor<'_>, mapper: &CoordinateMapper) -> Result<Entity> {
    let origin = mapper.position(c.read_vec3()?);
    let angle = Euler::read(c)?;
    let scale = mapper.scale(c.read_vec3()?);
    let name = c.read_fixed_str(20)?;
    let file_name = c.read_fixed_str(13)?;
    let action = c.read_fixed_str(20)?;
    let mut skills = [0.0; 20];
    skills[..8].copy_from_slice(&c.read_f32_array::<8>()?);
    let flags = c.read_u32()?;
    let ambient = c.read_f32()?;

    Ok(Entity {
        is_legacy: true,
        origin,
        angle,
        scale,
        name,
        file_name,
        action,
        skills,
        flags,
        ambient,
        albedo: 0.0,
        path: None,
        attached_entity: None,
        material: String::new(),
        string1: String::new(),
        string2: String::new(),
    })
}

fn parse_region(c: &mut Cursor<'_>, mapper: &CoordinateMapper) -> Result<Region> {
    let min = c.read_vec3()?;
    let max = c.read_vec3()?;
    c.skip(8)?;
    let name = c.read_fixed_str(32)?;
    let (min, max) = mapper.bounds(min, max);
    Ok(Region { name, min, max })
}
