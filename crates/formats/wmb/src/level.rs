use crate::coords::CoordinateMapper;
use crate::directory::Directory;
use crate::error::{Error, Result};
use crate::options::LoadOptions;
use crate::sections::blocks::{Block, Blocks};
use crate::sections::lightmaps::{Lightmap, Lightmaps, TerrainLightmaps};
use crate::sections::materials::{Material, Materials};
use crate::sections::objects::{
    Entity, Environment, Light, Object, Objects, Path, Position, Region, Sound,
};
use crate::sections::textures::{Texture, Textures};
use crate::warning::{Diagnostics, Warning};

/// A fully decoded level.
///
/// Cross references (skin to texture, lightmap and material, entity to path)
/// are plain indices and are not range checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub environment: Environment,
    pub textures: Vec<Texture>,
    pub materials: Vec<Material>,
    pub lightmaps: Vec<Lightmap>,
    pub terrain_lightmaps: Vec<Lightmap>,
    pub blocks: Vec<Block>,
    /// Placed objects in file order. The environment is not among them.
    pub objects: Vec<Object>,
    /// Recoverable problems, empty unless warnings are enabled.
    pub warnings: Vec<Warning>,
}

impl Level {
    /// Decode a level from the entire file contents.
    ///
    /// Sections are decoded in a fixed order: textures, materials and blocks,
    /// then objects, then both lightmap sections, which depend on the
    /// environment found among the objects.
    pub fn parse(data: &[u8], options: &LoadOptions) -> Result<Self> {
        let dir = Directory::parse(data)?;
        let mapper = CoordinateMapper::new(options.coordinate_system);
        let mut diag = Diagnostics::new(options.emit_warnings());

        let textures = if dir.textures.is_present() {
            Textures::parse(data, dir.textures)?.textures
        } else {
            Vec::new()
        };

        let materials = if dir.materials.is_present() {
            Materials::parse(data, dir.materials)?.materials
        } else {
            Vec::new()
        };

        let blocks = if dir.blocks.is_present() {
            Blocks::parse(data, dir.blocks, &mapper)?.blocks
        } else {
            Vec::new()
        };

        let Objects {
            environment,
            objects,
        } = if dir.objects.is_present() {
            Objects::parse(data, dir.objects, &mapper, &mut diag)?
        } else {
            Objects::default()
        };
        let environment = environment.ok_or(Error::MissingEnvironment)?;

        let lightmaps = if dir.lightmaps.is_present() {
            Lightmaps::parse(data, dir.lightmaps, environment.lightmap_size)?.lightmaps
        } else {
            Vec::new()
        };

        let terrain_lightmaps = if dir.terrain_lightmaps.is_present() {
            TerrainLightmaps::parse(data, dir.terrain_lightmaps)?.lightmaps
        } else {
            Vec::new()
        };

        Ok(Self {
            environment,
            textures,
            materials,
            lightmaps,
            terrain_lightmaps,
            blocks,
            objects,
            warnings: diag.into_warnings(),
        })
    }

    pub fn positions(&self) -> impl Iterator<Item = &Position> {
        self.objects.iter().filter_map(|o| match o {
            Object::Position(p) => Some(p),
            _ => None,
        })
    }

    pub fn lights(&self) -> impl Iterator<Item = &Light> {
        self.objects.iter().filter_map(|o| match o {
            Object::Light(l) => Some(l),
            _ => None,
        })
    }

    pub fn sounds(&self) -> impl Iterator<Item = &Sound> {
        self.objects.iter().filter_map(|o| match o {
            Object::Sound(s) => Some(s),
            _ => None,
        })
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.objects.iter().filter_map(|o| match o {
            Object::Path(p) => Some(p),
            _ => None,
        })
    }

    /// Entities in file order, legacy records included.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.objects.iter().filter_map(|o| match o {
            Object::Entity(e) => Some(e),
            _ => None,
        })
    }

    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.objects.iter().filter_map(|o| match o {
            Object::Region(r) => Some(r),
            _ => None,
        })
    }
}
