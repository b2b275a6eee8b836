//! User-facing violation messages (Spanish, as shown by the frontend).

use super::rule::PatternKind;

pub(crate) fn required(field: &str) -> String {
    format!("El campo {} es obligatorio.", field)
}

pub(crate) fn string(field: &str) -> String {
    format!("El campo {} debe ser una cadena de texto.", field)
}

pub(crate) fn int(field: &str) -> String {
    format!("El campo {} debe ser un número entero.", field)
}

pub(crate) fn float(field: &str) -> String {
    format!("El campo {} debe ser un número.", field)
}

pub(crate) fn boolean(field: &str) -> String {
    format!("El campo {} debe ser verdadero o falso.", field)
}

pub(crate) fn email(field: &str) -> String {
    format!("El campo {} debe ser un correo electrónico válido.", field)
}

pub(crate) fn min_length(field: &str, bound: f64) -> String {
    format!("El campo {} debe tener mínimo {} caracteres.", field, bound_text(bound))
}

pub(crate) fn max_length(field: &str, bound: f64) -> String {
    format!("El campo {} debe tener máximo {} caracteres.", field, bound_text(bound))
}

pub(crate) fn min_value(field: &str, bound: f64) -> String {
    format!("El campo {} debe ser mayor o igual a {}.", field, bound_text(bound))
}

pub(crate) fn max_value(field: &str, bound: f64) -> String {
    format!("El campo {} debe ser menor o igual a {}.", field, bound_text(bound))
}

pub(crate) fn pattern(field: &str, kind: PatternKind) -> String {
    match kind {
        PatternKind::Dni => format!("El campo {} debe ser un DNI válido.", field),
        PatternKind::Phone => format!("El campo {} debe ser un teléfono válido.", field),
        PatternKind::Username => format!(
            "El campo {} solo admite letras, números y guion bajo (entre 4 y 50 caracteres).",
            field
        ),
    }
}

pub(crate) fn date(field: &str) -> String {
    format!("El campo {} debe ser una fecha válida (AAAA-MM-DD).", field)
}

pub(crate) fn datetime(field: &str) -> String {
    format!("El campo {} debe ser una fecha y hora válida.", field)
}

pub(crate) fn one_of(field: &str, allowed: &[String]) -> String {
    format!("El campo {} debe ser uno de: {}.", field, allowed.join(", "))
}

/// `5.0` renders as `5`
fn bound_text(bound: f64) -> String {
    if bound.fract() == 0.0 && bound.abs() < i64::MAX as f64 {
        format!("{}", bound as i64)
    } else {
        bound.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_bounds_render_without_decimals() {
        assert_eq!(
            max_length("nombre", 5.0),
            "El campo nombre debe tener máximo 5 caracteres."
        );
        assert_eq!(min_value("coste", 0.5), "El campo coste debe ser mayor o igual a 0.5.");
    }
}
