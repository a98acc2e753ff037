use std::borrow::Cow;
use std::fmt;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, ComposerError, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

/// Wraps `naga_oil::compose::Composer` to provide shader composition with `#import` support.
///
/// Pre-loads all shared WGSL modules at construction time. Consuming shaders use
/// `#import scrollscene::module_name` to pull in shared code. The composer produces
/// `naga::Module` IR directly, skipping WGSL re-parse at runtime.
pub struct ShaderComposer {
    composer: Composer,
}

/// A shader failed to register or compose.
#[derive(Debug)]
pub struct ShaderError {
    /// Shader file the error refers to.
    pub file_path: String,
    /// Composer diagnostic.
    pub source: Box<ComposerError>,
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shader '{}': {}", self.file_path, self.source)
    }
}

impl std::error::Error for ShaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.source)
    }
}

/// Shared module definition: (source, file_path)
struct ModuleDef {
    source: &'static str,
    file_path: &'static str,
}

/// Shared modules in dependency order.
const MODULES: &[ModuleDef] = &[
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/camera.wgsl"),
        file_path: "modules/camera.wgsl",
    },
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/lighting.wgsl"),
        file_path: "modules/lighting.wgsl",
    },
];

impl ShaderComposer {
    /// Create a composer with every shared module registered.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError`] if a shared module fails to parse.
    pub fn new() -> Result<Self, ShaderError> {
        let mut composer = Composer::default();

        for m in MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: m.source,
                    file_path: m.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| ShaderError {
                    file_path: m.file_path.to_owned(),
                    source: Box::new(e),
                })?;
        }

        Ok(Self { composer })
    }

    /// Compose a shader source string (which may contain `#import` directives)
    /// into a `wgpu::ShaderModule` ready for pipeline creation.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError`] if composition fails.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        source: &str,
        file_path: &str,
    ) -> Result<wgpu::ShaderModule, ShaderError> {
        let naga_module = self.compose_naga(source, file_path)?;

        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(naga_module)),
        }))
    }

    /// Compose a shader source into a `naga::Module` without creating a wgpu shader module.
    /// Useful for testing shader composition without a GPU device.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError`] if composition fails.
    pub fn compose_naga(
        &mut self,
        source: &str,
        file_path: &str,
    ) -> Result<naga::Module, ShaderError> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| ShaderError {
                file_path: file_path.to_owned(),
                source: Box::new(e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Shader source definitions for all composable shaders in the project.
    /// Each entry is (source, file_path).
    fn all_shader_sources() -> Vec<(&'static str, &'static str)> {
        vec![
            (
                include_str!("../../assets/shaders/raster/toon_mesh.wgsl"),
                "toon_mesh.wgsl",
            ),
            (
                include_str!("../../assets/shaders/raster/particles.wgsl"),
                "particles.wgsl",
            ),
        ]
    }

    #[test]
    fn all_shaders_compose() {
        let mut composer = ShaderComposer::new().unwrap();
        for (source, path) in all_shader_sources() {
            let module = composer.compose_naga(source, path);
            assert!(module.is_ok(), "{path}: {}", module.unwrap_err());
        }
    }

    #[test]
    fn composed_shaders_validate() {
        let mut composer = ShaderComposer::new().unwrap();
        for (source, path) in all_shader_sources() {
            let module = composer.compose_naga(source, path).unwrap();
            let mut validator = naga::valid::Validator::new(
                naga::valid::ValidationFlags::all(),
                naga::valid::Capabilities::default(),
            );
            let info = validator.validate(&module);
            assert!(info.is_ok(), "{path}: {:?}", info.err());
        }
    }

    #[test]
    fn unknown_import_is_an_error() {
        let mut composer = ShaderComposer::new().unwrap();
        let err = composer
            .compose_naga(
                "#import scrollscene::nope\n\
                 fn shade() -> f32 { return nope::strength; }\n",
                "broken.wgsl",
            )
            .unwrap_err();
        assert_eq!(err.file_path, "broken.wgsl");
    }
}
