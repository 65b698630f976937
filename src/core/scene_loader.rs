// Copyright @yucwang 2026

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::core::assets::Assets;
use crate::core::bsdf::BSDF;
use crate::core::computation_node::ComputationNode;
use crate::core::factory::ComponentFactory;
use crate::core::property::{parse_float, parse_vec3, LoadError, PropertyNode, PropertyValue};
use crate::math::constants::Vector3f;
use crate::math::spectrum::RGBSpectrum;
use crate::textures::constant::ConstantTexture;

/// Textures and BSDFs declared by a material file, in declaration order.
#[derive(Default)]
pub struct MaterialLibrary {
    assets: Assets,
    bsdfs: Vec<Arc<dyn BSDF>>,
    index: HashMap<String, usize>,
}

impl MaterialLibrary {
    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    pub fn bsdfs(&self) -> &[Arc<dyn BSDF>] {
        &self.bsdfs
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn BSDF>> {
        self.index.get(id).map(|&i| self.bsdfs[i].clone())
    }

    pub fn len(&self) -> usize {
        self.bsdfs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bsdfs.is_empty()
    }

    fn add_bsdf(&mut self, bsdf: Box<dyn BSDF>) -> Result<(), LoadError> {
        let id = bsdf.id().to_string();
        if self.index.contains_key(&id) {
            return Err(LoadError::Parse(format!("duplicate bsdf id: {}", id)));
        }
        self.index.insert(id, self.bsdfs.len());
        self.bsdfs.push(Arc::from(bsdf));
        Ok(())
    }
}

pub fn load_materials<P: AsRef<Path>>(path: P) -> Result<MaterialLibrary, LoadError> {
    let path = path.as_ref();
    let xml = fs::read_to_string(path)?;
    log::info!("Loading materials from {}.", path.display());
    parse_materials(&xml)
}

pub fn parse_materials(xml: &str) -> Result<MaterialLibrary, LoadError> {
    parse_materials_with(xml, &ComponentFactory::with_builtins())
}

pub fn parse_materials_with(xml: &str, factory: &ComponentFactory) -> Result<MaterialLibrary, LoadError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut parser = MaterialParser::new(factory);

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => parser.start(&e)?,
            Ok(Event::Empty(e)) => {
                parser.start(&e)?;
                parser.end(e.name().as_ref())?;
            }
            Ok(Event::End(e)) => parser.end(e.name().as_ref())?,
            Err(e) => {
                return Err(LoadError::Parse(e.to_string()));
            }
            _ => {}
        }

        buf.clear();
    }

    parser.finish()
}

struct PendingBSDF {
    kind: String,
    id: Option<String>,
    props: PropertyNode,
}

struct PendingTexture {
    kind: String,
    id: Option<String>,
    // Set for textures nested in a bsdf: the reflectance slot they bind to.
    slot: Option<String>,
    value: Option<Vector3f>,
}

struct MaterialParser<'f> {
    factory: &'f ComponentFactory,
    defaults: HashMap<String, String>,
    library: MaterialLibrary,
    bsdf: Option<PendingBSDF>,
    texture: Option<PendingTexture>,
    nested_textures: usize,
}

impl<'f> MaterialParser<'f> {
    fn new(factory: &'f ComponentFactory) -> Self {
        Self {
            factory,
            defaults: HashMap::new(),
            library: MaterialLibrary::default(),
            bsdf: None,
            texture: None,
            nested_textures: 0,
        }
    }

    fn start(&mut self, e: &BytesStart) -> Result<(), LoadError> {
        match e.name().as_ref() {
            b"default" => {
                let attrs = read_attributes(e, None);
                if let (Some(k), Some(v)) = (attrs.get("name"), attrs.get("value")) {
                    self.defaults.insert(k.clone(), v.clone());
                }
            }
            b"bsdf" => {
                if self.bsdf.is_some() {
                    return Err(LoadError::Parse(String::from("nested bsdf declarations are not supported")));
                }
                let mut attrs = read_attributes(e, Some(&self.defaults));
                let kind = attrs.remove("type").ok_or(LoadError::MissingField("bsdf.type"))?;
                self.bsdf = Some(PendingBSDF { kind, id: attrs.remove("id"), props: PropertyNode::new() });
            }
            b"texture" => {
                if self.texture.is_some() {
                    return Err(LoadError::Parse(String::from("nested texture declarations are not supported")));
                }
                let mut attrs = read_attributes(e, Some(&self.defaults));
                let kind = attrs.remove("type").ok_or(LoadError::MissingField("texture.type"))?;
                let slot = if self.bsdf.is_some() {
                    Some(attrs.remove("name").ok_or(LoadError::MissingField("texture.name"))?)
                } else {
                    None
                };
                self.texture = Some(PendingTexture { kind, id: attrs.remove("id"), slot, value: None });
            }
            b"ref" => {
                let attrs = read_attributes(e, Some(&self.defaults));
                let bsdf = self.bsdf.as_mut()
                    .ok_or_else(|| LoadError::Parse(String::from("<ref> outside of a bsdf")))?;
                let name = attrs.get("name").ok_or(LoadError::MissingField("ref.name"))?;
                let id = attrs.get("id").ok_or(LoadError::MissingField("ref.id"))?;
                bsdf.props.set(&texture_slot(name), PropertyValue::Str(id.clone()));
            }
            b"rgb" | b"float" | b"string" => {
                let attrs = read_attributes(e, Some(&self.defaults));
                let name = attrs.get("name").ok_or(LoadError::MissingField("property.name"))?;
                let value = attrs.get("value").ok_or(LoadError::MissingField("property.value"))?;
                let value = match e.name().as_ref() {
                    b"rgb" => PropertyValue::RGB(parse_vec3(value)?),
                    b"float" => PropertyValue::Float(parse_float(value)?),
                    _ => PropertyValue::Str(value.clone()),
                };

                if let Some(texture) = self.texture.as_mut() {
                    match value {
                        PropertyValue::RGB(v) => texture.value = Some(v),
                        PropertyValue::Float(v) => texture.value = Some(Vector3f::new(v, v, v)),
                        PropertyValue::Str(_) => {
                            log::warn!("Ignoring string property {} on texture.", name);
                        }
                    }
                } else if let Some(bsdf) = self.bsdf.as_mut() {
                    bsdf.props.set(name, value);
                } else {
                    log::warn!("Ignoring property {} outside of a bsdf or texture.", name);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn end(&mut self, name: &[u8]) -> Result<(), LoadError> {
        match name {
            b"texture" => {
                if let Some(texture) = self.texture.take() {
                    self.finish_texture(texture)?;
                }
            }
            b"bsdf" => {
                if let Some(bsdf) = self.bsdf.take() {
                    self.finish_bsdf(bsdf)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn finish_texture(&mut self, texture: PendingTexture) -> Result<(), LoadError> {
        if texture.kind != "constant" {
            return Err(LoadError::UnknownComponent(format!("texture::{}", texture.kind)));
        }
        let value = texture.value.ok_or(LoadError::MissingField("texture.value"))?;

        let id = match (&texture.slot, texture.id) {
            (_, Some(id)) => id,
            (Some(slot), None) => {
                self.nested_textures += 1;
                format!("{}_texture_{}", slot, self.nested_textures)
            }
            (None, None) => return Err(LoadError::MissingField("texture.id")),
        };
        self.library.assets.add_texture(&id, Arc::new(ConstantTexture::new(RGBSpectrum::from_rgb(&value))));
        log::debug!("Registered constant texture {}.", id);

        if let (Some(slot), Some(bsdf)) = (texture.slot, self.bsdf.as_mut()) {
            bsdf.props.set(&texture_slot(&slot), PropertyValue::Str(id));
        }
        Ok(())
    }

    fn finish_bsdf(&mut self, pending: PendingBSDF) -> Result<(), LoadError> {
        let component = format!("bsdf::{}", pending.kind);
        let mut bsdf = self.factory.load(&component, &pending.props, &self.library.assets)?;
        if let Some(id) = pending.id {
            bsdf.set_id(&id);
        }
        log::info!("Loaded {} as {}.", bsdf.id(), ComputationNode::to_string(bsdf.as_ref()));
        self.library.add_bsdf(bsdf)
    }

    fn finish(self) -> Result<MaterialLibrary, LoadError> {
        if self.bsdf.is_some() || self.texture.is_some() {
            return Err(LoadError::Parse(String::from("unterminated declaration")));
        }
        log::info!("Loaded {} bsdf(s) and {} texture(s).",
                   self.library.len(), self.library.assets.num_textures());
        Ok(self.library)
    }
}

// `<texture name="R">` and `<ref name="R">` bind the `TexR` slot.
fn texture_slot(name: &str) -> String {
    if name.starts_with("Tex") {
        name.to_string()
    } else {
        format!("Tex{}", name)
    }
}

fn read_attributes(e: &BytesStart, defaults: Option<&HashMap<String, String>>) -> HashMap<String, String> {
    let mut attrs = HashMap::new();
    for attr in e.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let raw = attr.unescape_value().unwrap_or_default();
        let value = match defaults {
            Some(defaults) => resolve_value(&raw, defaults),
            None => raw.to_string(),
        };
        attrs.insert(key, value);
    }
    attrs
}

// Longer names go first so `$roughness` is not split by a `rough` default.
fn resolve_value(raw: &str, defaults: &HashMap<String, String>) -> String {
    let mut keys: Vec<&String> = defaults.keys().collect();
    keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let mut out = raw.to_string();
    for k in keys {
        out = out.replace(&format!("${}", k), &defaults[k]);
    }
    out
}
