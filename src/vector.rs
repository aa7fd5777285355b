type Vector = [f32; 3];

pub fn normalize_vector(vector: &Vector) -> Vector {
    let magnitude = dot_product(vector, vector).sqrt();

    if magnitude == 0.0 {
        return [0.0, 0.0, 0.0];
    }

    [vector[0] / magnitude, vector[1] / magnitude, vector[2] / magnitude]
}

pub fn dot_product(a: &Vector, b: &Vector) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn cross_product(a: &Vector, b: &Vector) -> Vector {
    // < aybz - azby, azbx - axbz, axby - aybx >
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub fn subtract_vectors(a: &[f32; 4], b: &[f32; 4]) -> Vector {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normalize_has_unit_length() {
        let n = normalize_vector(&[3.0, 0.0, 4.0]);
        assert_relative_eq!(n[0], 0.6);
        assert_relative_eq!(n[2], 0.8);
    }

    #[test]
    fn normalize_zero_stays_zero() {
        assert_eq!(normalize_vector(&[0.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn cross_of_x_and_y_is_z() {
        assert_eq!(cross_product(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
    }
}
