use std::sync::OnceLock;

/// User-facing message catalog. The service speaks Spanish by default; a
/// different catalog can be installed once at startup before any request is
/// served.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    pub field_required: String,
    pub field_max_length: String,
    pub invalid_status: String,
    pub invalid_date: String,
    pub invalid_email: String,
    pub password_too_short: String,
    pub validation_failed: String,
    pub invalid_id: String,
    pub no_tasks_found: String,
    pub task_not_found: String,
    pub task_updated: String,
    pub task_deleted: String,
    pub server_error: String,
    pub unauthorized: String,
    pub invalid_credentials: String,
    pub email_taken: String,
    pub user_registered: String,
    pub logged_out: String,
}

impl MessageCatalog {
    pub fn spanish() -> Self {
        Self {
            field_required: "El campo {field} es obligatorio".into(),
            field_max_length: "El campo {field} no debe ser mayor que {max} caracteres".into(),
            invalid_status: "El campo estado debe ser uno de: pending, in_progress, completed"
                .into(),
            invalid_date: "El campo fecha de vencimiento debe ser una fecha válida (YYYY-MM-DD)"
                .into(),
            invalid_email: "El campo correo debe ser una dirección válida".into(),
            password_too_short: "La contraseña debe tener al menos {min} caracteres".into(),
            validation_failed: "Error en la validación de los datos".into(),
            invalid_id: "El identificador debe ser numérico".into(),
            no_tasks_found: "No se encontraron tareas".into(),
            task_not_found: "Tarea no encontrada".into(),
            task_updated: "Tarea actualizada correctamente".into(),
            task_deleted: "Tarea eliminada correctamente".into(),
            server_error: "Error interno del servidor".into(),
            unauthorized: "No autenticado".into(),
            invalid_credentials: "Credenciales inválidas".into(),
            email_taken: "El correo ya está registrado".into(),
            user_registered: "Usuario registrado correctamente".into(),
            logged_out: "Sesión cerrada correctamente".into(),
        }
    }

    /// Render a template that carries a `{field}` placeholder.
    pub fn for_field(template: &str, field: &str) -> String {
        template.replace("{field}", field)
    }

    /// Render a template with `{field}` and `{max}` placeholders.
    pub fn for_field_max(template: &str, field: &str, max: usize) -> String {
        template
            .replace("{field}", field)
            .replace("{max}", &max.to_string())
    }

    /// Render a template with a `{min}` placeholder.
    pub fn for_min(template: &str, min: usize) -> String {
        template.replace("{min}", &min.to_string())
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::spanish()
    }
}

static CATALOG: OnceLock<MessageCatalog> = OnceLock::new();

/// Install a catalog. Returns the rejected catalog if one was already set.
pub fn set_catalog(catalog: MessageCatalog) -> Result<(), MessageCatalog> {
    CATALOG.set(catalog)
}

pub fn catalog() -> &'static MessageCatalog {
    CATALOG.get_or_init(MessageCatalog::spanish)
}
