type Vector = [f32; 3];

use crate::{
    constants::SPECULAR_EXPONENT,
    vector::{normalize_vector, dot_product}
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub color: Vector,
    // normalized direction towards the light
    pub direction: Vector,
}

impl PointLight {
    pub fn new(color: Vector, position: Vector) -> Self {
        Self { color, direction: normalize_vector(&position) }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LightingConfig {
    pub ambient_light_color: Vector,
    pub point_lights: Vec<PointLight>,
    // note: viewer vector is always <0, 0, 1> so the specular math is hardcoded
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReflectionConstants {
    pub ambient: Vector,
    pub diffuse: Vector,
    pub specular: Vector,
}

pub fn get_illumination(normal: &Vector, config: &LightingConfig, constants: &ReflectionConstants) -> (usize, usize, usize) {
    let normal = &normalize_vector(normal);

    let ambient = get_ambient(&config.ambient_light_color, &constants.ambient);
    let diffuse = get_diffuse(normal, &config.point_lights, &constants.diffuse);
    let specular = get_specular(normal, &config.point_lights, &constants.specular);

    clamp_color([
        ambient[0] + diffuse[0] + specular[0],
        ambient[1] + diffuse[1] + specular[1],
        ambient[2] + diffuse[2] + specular[2],
    ])
}

pub fn get_ambient(ambient_light_color: &Vector, ambient_constant: &Vector) -> Vector {
    [
        ambient_light_color[0] * ambient_constant[0],
        ambient_light_color[1] * ambient_constant[1],
        ambient_light_color[2] * ambient_constant[2],
    ]
}

pub fn get_diffuse(normal: &Vector, point_lights: &[PointLight], diffuse_constant: &Vector) -> Vector {
    // i_diffuse = point color * kd * (n . l)
    point_lights.iter().fold([0.0; 3], |mut diffuse, light| {
        let n_dot_l = f32::max(0.0, dot_product(normal, &light.direction));
        for channel in 0..3 {
            diffuse[channel] += light.color[channel] * diffuse_constant[channel] * n_dot_l;
        }
        diffuse
    })
}

pub fn get_specular(normal: &Vector, point_lights: &[PointLight], specular_constant: &Vector) -> Vector {
    // i_specular = point color * ks * (r . v)^exp with r = 2n(n . l) - l
    // v is <0, 0, 1> so r . v is just the z component of r
    point_lights.iter().fold([0.0; 3], |mut specular, light| {
        let n_dot_l = f32::max(0.0, dot_product(normal, &light.direction));
        let r_z = f32::max(0.0, 2.0 * normal[2] * n_dot_l - light.direction[2]).powf(SPECULAR_EXPONENT);
        for channel in 0..3 {
            specular[channel] += light.color[channel] * specular_constant[channel] * r_z;
        }
        specular
    })
}

fn clamp_color(vector: Vector) -> (usize, usize, usize) {
    (
        vector[0].clamp(0.0, 255.0) as usize,
        vector[1].clamp(0.0, 255.0) as usize,
        vector[2].clamp(0.0, 255.0) as usize,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matte() -> ReflectionConstants {
        ReflectionConstants {
            ambient: [0.5, 0.5, 0.5],
            diffuse: [1.0, 1.0, 1.0],
            specular: [0.0, 0.0, 0.0],
        }
    }

    #[test]
    fn ambient_only_without_lights() {
        let config = LightingConfig { ambient_light_color: [100.0, 50.0, 0.0], point_lights: vec![] };
        assert_eq!(get_illumination(&[0.0, 0.0, 1.0], &config, &matte()), (50, 25, 0));
    }

    #[test]
    fn lights_behind_the_surface_contribute_nothing() {
        let config = LightingConfig {
            ambient_light_color: [0.0, 0.0, 0.0],
            point_lights: vec![PointLight::new([255.0, 255.0, 255.0], [0.0, 0.0, -1.0])],
        };
        assert_eq!(get_illumination(&[0.0, 0.0, 1.0], &config, &matte()), (0, 0, 0));
    }

    #[test]
    fn head_on_light_saturates() {
        let config = LightingConfig {
            ambient_light_color: [200.0, 200.0, 200.0],
            point_lights: vec![PointLight::new([255.0, 0.0, 0.0], [0.0, 0.0, 5.0])],
        };
        assert_eq!(get_illumination(&[0.0, 0.0, 3.0], &config, &matte()), (255, 100, 100));
    }
}
