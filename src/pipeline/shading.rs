use crate::io::render_settings::{RenderSettings, ShadingMode};
use crate::scene::material::Material;
use nalgebra::{Vector2, Vector3};

/// Intensity of the fixed key light.
const LIGHT_INTENSITY: f32 = 7.0;
/// Base specular exponent, scaled by the sampled glossiness.
const SHININESS: f32 = 25.0;
/// Ambient contribution per channel, added unconditionally.
const AMBIENT: f32 = 0.025;

/// Direction from the surface toward the key light.
fn direction_to_light() -> Vector3<f32> {
    -Vector3::new(0.577, -0.577, 0.577).normalize()
}

/// Interpolated per-pixel attributes handed over by the rasterizer.
#[derive(Debug, Clone, Copy)]
pub struct Fragment {
    pub uv: Vector2<f32>,
    pub normal: Vector3<f32>,
    pub tangent: Vector3<f32>,
    pub view_direction: Vector3<f32>,
}

/// Computes the fragment's color under the fixed key light.
///
/// Surfaces facing away from the light resolve to the ambient-only base.
pub fn shade(fragment: &Fragment, material: &Material, settings: &RenderSettings) -> Vector3<f32> {
    let normal = if settings.use_normal_map {
        perturbed_normal(fragment, material)
    } else {
        fragment.normal
    };

    let to_light = direction_to_light();
    let lambert = normal.dot(&to_light);
    if lambert < 0.0 {
        return Vector3::repeat(AMBIENT);
    }

    let mut color = Vector3::zeros();
    match settings.shading_mode {
        ShadingMode::ObservedArea => {
            color += Vector3::repeat(lambert);
        }
        ShadingMode::Diffuse => {
            color += material.diffuse.sample(&fragment.uv) * lambert * LIGHT_INTENSITY;
        }
        ShadingMode::Specular => {
            color += phong(fragment, material, &to_light, &normal) * lambert;
        }
        ShadingMode::Combined => {
            // The specular term carries no lambert or intensity factor here.
            color += material.diffuse.sample(&fragment.uv) * lambert * LIGHT_INTENSITY
                + phong(fragment, material, &to_light, &normal);
        }
    }

    color + Vector3::repeat(AMBIENT)
}

/// Phong specular lobe: the light direction mirrored about the normal,
/// against the camera-to-surface view direction, raised to the sampled
/// glossiness exponent and scaled by the sampled specular color.
fn phong(
    fragment: &Fragment,
    material: &Material,
    to_light: &Vector3<f32>,
    normal: &Vector3<f32>,
) -> Vector3<f32> {
    let specular = material.specular.sample(&fragment.uv);
    let exponent = material.glossiness.sample(&fragment.uv).x * SHININESS;

    let reflect = to_light - normal * (2.0 * normal.dot(to_light));
    let cos_alpha = reflect.dot(&fragment.view_direction).max(0.0);

    specular * cos_alpha.powf(exponent)
}

/// Tangent-space normal mapping: the sampled normal is remapped from [0, 1]
/// to [-1, 1] and rotated into world space by the (tangent, binormal,
/// normal) basis.
fn perturbed_normal(fragment: &Fragment, material: &Material) -> Vector3<f32> {
    let binormal = fragment.normal.cross(&fragment.tangent);
    let sample = material.normal.sample(&fragment.uv) * 2.0 - Vector3::repeat(1.0);

    (fragment.tangent * sample.x + binormal * sample.y + fragment.normal * sample.z).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::material::{FlatColor, Material};
    use std::sync::Arc;

    fn fragment_facing_camera() -> Fragment {
        Fragment {
            uv: Vector2::zeros(),
            normal: Vector3::new(0.0, 0.0, -1.0),
            tangent: Vector3::new(1.0, 0.0, 0.0),
            view_direction: Vector3::new(0.0, 0.0, 1.0),
        }
    }

    fn settings(shading_mode: ShadingMode, use_normal_map: bool) -> RenderSettings {
        RenderSettings {
            shading_mode,
            use_normal_map,
            ..RenderSettings::default()
        }
    }

    /// Lambert cosine of the camera-facing normal against the key light.
    fn expected_lambert() -> f32 {
        Vector3::new(0.0, 0.0, -1.0_f32).dot(&direction_to_light())
    }

    #[test]
    fn surfaces_facing_away_resolve_to_the_ambient_base() {
        let mut fragment = fragment_facing_camera();
        fragment.normal = Vector3::new(0.0, 0.0, 1.0);

        let color = shade(
            &fragment,
            &Material::default(),
            &settings(ShadingMode::Combined, false),
        );
        assert_eq!(color, Vector3::repeat(AMBIENT));
    }

    #[test]
    fn observed_area_is_the_broadcast_lambert_plus_ambient() {
        let color = shade(
            &fragment_facing_camera(),
            &Material::default(),
            &settings(ShadingMode::ObservedArea, false),
        );
        let expected = expected_lambert() + AMBIENT;
        assert!((color.x - expected).abs() < 1e-5);
        assert_eq!(color.x, color.y);
        assert_eq!(color.y, color.z);
    }

    #[test]
    fn diffuse_mode_scales_the_sample_by_lambert_and_intensity() {
        let material = Material::flat(Vector3::new(0.1, 0.0, 0.0));
        let color = shade(
            &fragment_facing_camera(),
            &material,
            &settings(ShadingMode::Diffuse, false),
        );
        let expected = 0.1 * expected_lambert() * LIGHT_INTENSITY + AMBIENT;
        assert!((color.x - expected).abs() < 1e-5);
        assert!((color.y - AMBIENT).abs() < 1e-6);
    }

    #[test]
    fn combined_mode_adds_bare_specular_to_the_diffuse_term() {
        let material = Material::flat(Vector3::new(0.1, 0.1, 0.1));
        let fragment = fragment_facing_camera();

        let lambert = expected_lambert();
        let to_light = direction_to_light();
        let reflect = to_light - fragment.normal * (2.0 * fragment.normal.dot(&to_light));
        let cos_alpha = reflect.dot(&fragment.view_direction).max(0.0);
        // Material::flat uses white specular and glossiness.
        let specular = cos_alpha.powf(SHININESS);

        let combined = shade(&fragment, &material, &settings(ShadingMode::Combined, false));
        let expected = 0.1 * lambert * LIGHT_INTENSITY + specular + AMBIENT;
        assert!((combined.x - expected).abs() < 1e-5);

        // Specular-only mode, by contrast, scales the lobe by the lambert cosine.
        let specular_only = shade(&fragment, &material, &settings(ShadingMode::Specular, false));
        let expected_specular = specular * lambert + AMBIENT;
        assert!((specular_only.x - expected_specular).abs() < 1e-5);
    }

    #[test]
    fn disabling_the_normal_map_restores_the_geometric_normal() {
        // A normal map sample of pure +X tangent direction: the perturbed
        // normal becomes the tangent itself, which faces away from the light.
        let material = Material {
            normal: Arc::new(FlatColor(Vector3::new(1.0, 0.5, 0.5))),
            ..Material::default()
        };
        let fragment = fragment_facing_camera();

        let mapped = shade(&fragment, &material, &settings(ShadingMode::ObservedArea, true));
        let unmapped = shade(&fragment, &material, &settings(ShadingMode::ObservedArea, false));

        assert_eq!(mapped, Vector3::repeat(AMBIENT));
        assert!((unmapped.x - (expected_lambert() + AMBIENT)).abs() < 1e-5);
    }
}
