//! Record resources served by the API and the input rules for each one.
//!
//! Rule sets are declared in the textual grammar and decoded once at startup;
//! a malformed declaration aborts the boot.

use crate::application::roles::{self, ADMINISTRADOR, MECANICO, OPERADOR, SUPERVISOR};
use crate::domain::routing::RoleId;
use crate::domain::validation::{FieldRules, RuleParseError};

/// One record resource (`/personal`, `/vehiculos`, ...)
#[derive(Debug, Clone)]
pub struct ResourceDefinition {
    /// Collection path segment and storage key
    pub name: &'static str,
    /// Rules applied to create and replace bodies
    pub rules: FieldRules,
    pub read_roles: Vec<RoleId>,
    pub write_roles: Vec<RoleId>,
    pub delete_roles: Vec<RoleId>,
}

impl ResourceDefinition {
    fn new(
        name: &'static str,
        declarations: &[(&str, &str)],
        write_roles: &[RoleId],
    ) -> Result<Self, RuleParseError> {
        Ok(Self {
            name,
            rules: FieldRules::parse(declarations.iter().copied())?,
            read_roles: roles::ALL.to_vec(),
            write_roles: write_roles.to_vec(),
            delete_roles: vec![ADMINISTRADOR],
        })
    }
}

/// All resources, in the order their routes are registered
pub fn default_resources() -> Result<Vec<ResourceDefinition>, RuleParseError> {
    Ok(vec![
        ResourceDefinition::new(
            "personal",
            &[
                ("nombre", "required|string|min:2|max:100"),
                ("apellidos", "required|string|min:2|max:150"),
                ("dni", "required|dni"),
                ("usuario", "required|username"),
                ("email", "email|max:150"),
                ("telefono", "phone"),
                ("fecha_nacimiento", "date"),
                ("rol", "required|int|in:1,2,3,4,5"),
                ("activo", "boolean"),
            ],
            &[ADMINISTRADOR, SUPERVISOR],
        )?,
        ResourceDefinition::new(
            "vehiculos",
            &[
                ("matricula", "required|string|min:4|max:10"),
                ("marca", "required|string|max:50"),
                ("modelo", "string|max:50"),
                ("anio", "int|min:1950|max:2100"),
                ("plazas", "int|min:1|max:60"),
                ("estado", "required|in:OPERATIVO,TALLER,BAJA"),
            ],
            &[ADMINISTRADOR, SUPERVISOR],
        )?,
        ResourceDefinition::new(
            "emergencias",
            &[
                ("titulo", "required|string|min:3|max:150"),
                ("descripcion", "string|max:2000"),
                ("direccion", "required|string|max:255"),
                ("fecha_hora", "required|datetime"),
                ("prioridad", "required|int|min:1|max:5"),
                ("estado", "required|in:ABIERTA,CERRADA"),
                ("telefono_contacto", "phone"),
            ],
            &[ADMINISTRADOR, SUPERVISOR, OPERADOR],
        )?,
        ResourceDefinition::new(
            "mantenimientos",
            &[
                ("vehiculo_id", "required|int|min:1"),
                ("fecha", "required|date"),
                ("tipo", "required|in:PREVENTIVO,CORRECTIVO,ITV"),
                ("descripcion", "required|string|max:1000"),
                ("kilometraje", "int|min:0"),
                ("coste", "float|min:0"),
                ("finalizado", "boolean"),
            ],
            &[ADMINISTRADOR, SUPERVISOR, MECANICO],
        )?,
        ResourceDefinition::new(
            "carnets",
            &[
                ("personal_id", "required|int|min:1"),
                ("tipo", "required|in:AM,A1,A2,A,B,C1,C,D1,D,BTP"),
                ("numero", "required|string|max:30"),
                ("fecha_expedicion", "required|date"),
                ("fecha_caducidad", "required|date"),
            ],
            &[ADMINISTRADOR, SUPERVISOR],
        )?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};

    fn body(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn resource(name: &str) -> ResourceDefinition {
        default_resources()
            .unwrap()
            .into_iter()
            .find(|r| r.name == name)
            .unwrap()
    }

    #[test]
    fn test_all_declarations_parse() {
        let resources = default_resources().unwrap();
        let names: Vec<&str> = resources.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec!["personal", "vehiculos", "emergencias", "mantenimientos", "carnets"]
        );
        assert!(resources.iter().all(|r| r.delete_roles == vec![ADMINISTRADOR]));
    }

    #[test]
    fn test_personal_rules() {
        let rules = resource("personal").rules;
        let clean = rules
            .validate(&body(json!({
                "nombre": " Lucía ",
                "apellidos": "García Pérez",
                "dni": "12345678Z",
                "usuario": "lgarcia",
                "email": "lucia@example.com",
                "telefono": "",
                "rol": "3",
                "activo": "1",
                "password": "ignorada"
            })))
            .into_result()
            .unwrap();

        assert_eq!(clean["nombre"], json!("Lucía"));
        assert_eq!(clean["rol"], json!(3));
        assert_eq!(clean["activo"], json!(true));
        assert_eq!(clean["telefono"], Value::Null);
        assert!(!clean.contains_key("password"));
    }

    #[test]
    fn test_emergencia_estado_is_case_sensitive() {
        let rules = resource("emergencias").rules;
        let errors = rules
            .validate(&body(json!({
                "titulo": "Incendio en nave",
                "direccion": "Polígono Sur, 4",
                "fecha_hora": "2024-05-01 10:30:00",
                "prioridad": 1,
                "estado": "abierta"
            })))
            .into_result()
            .unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["estado"]);
    }

    #[test]
    fn test_mantenimiento_write_roles_include_mecanico() {
        assert!(resource("mantenimientos").write_roles.contains(&MECANICO));
        assert!(!resource("vehiculos").write_roles.contains(&MECANICO));
    }
}
