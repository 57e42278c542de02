//! Fixed lookup tables used during extraction: Java-to-SQL type mapping,
//! per-column example values and per-entity functional descriptions.

/// Map a declared Java type to its SQL type keyword. Generic parameters
/// are stripped before lookup; unknown types map to VARCHAR, so the
/// mapping is total.
pub fn sql_type_for(java_type: &str) -> &'static str {
    let base_type = java_type.split('<').next().unwrap_or(java_type);

    match base_type {
        "String" => "VARCHAR",
        "Long" | "long" => "BIGINT",
        "Integer" | "int" => "INTEGER",
        "Boolean" | "boolean" => "BOOLEAN",
        "LocalDate" => "DATE",
        "LocalDateTime" => "TIMESTAMP",
        "LocalTime" => "TIME",
        "BigDecimal" => "DECIMAL",
        "Double" | "double" => "DOUBLE",
        "Float" | "float" => "REAL",
        "byte[]" | "Byte[]" => "BYTEA",
        _ => "VARCHAR",
    }
}

/// Example values for common column names. Matched case-insensitively as a
/// substring of the resolved column name, first entry wins, so more
/// specific keys must come after their prefixes are acceptable fallbacks
/// (e.g. `codigo_estudiante` resolves through `codigo`).
const EXAMPLE_VALUES: &[(&str, &str)] = &[
    ("nombre", "Universidad Nacional del Altiplano"),
    ("codigo", "UNA001"),
    ("descripcion", "Descripción detallada del registro"),
    ("email", "contacto@universidad.edu.pe"),
    ("telefono", "051-363456"),
    ("celular", "987654321"),
    ("direccion", "Av. Ejercito 329, Puno"),
    ("fecha_nacimiento", "1995-06-15"),
    ("fecha_ingreso", "2024-03-01"),
    ("nombres", "Juan Carlos"),
    ("apellido_paterno", "Pérez"),
    ("apellido_materno", "García"),
    ("numero_documento", "72345678"),
    ("ruc", "20345678901"),
    ("dominio", "unap.edu.pe"),
    ("estado", "ACTIVO"),
    ("activo", "true"),
    ("usuario", "jperez"),
    ("password", "$2a$10$encrypted..."),
    ("creditos", "4"),
    ("nota", "16.5"),
    ("promedio", "15.8"),
    ("ciclo", "5"),
    ("semestre", "2024-I"),
    ("codigo_estudiante", "2024001234"),
    ("codigo_empleado", "EMP001"),
];

/// Derive an example value for a column. The domain lookup table is
/// consulted first; otherwise a default keyed on the Java type applies.
pub fn example_for(column_name: &str, java_type: &str) -> String {
    let lower = column_name.to_lowercase();

    for (key, value) in EXAMPLE_VALUES {
        if lower.contains(key) {
            return (*value).to_string();
        }
    }

    match java_type {
        "String" => "Texto de ejemplo".to_string(),
        "Long" | "Integer" | "int" | "long" => "1".to_string(),
        "Boolean" | "boolean" => "true".to_string(),
        "LocalDate" | "LocalDateTime" => "2024-01-15".to_string(),
        "BigDecimal" => "0.00".to_string(),
        _ => "valor".to_string(),
    }
}

/// Fixed functional descriptions per known entity
pub fn functional_description(entity_name: &str) -> &'static str {
    match entity_name {
        "Universidad" => "Gestiona información de universidades/instituciones. Central para multitenancy.",
        "Persona" => "Registro centralizado de personas (estudiantes, profesores, empleados).",
        "Estudiante" => "Gestiona datos académicos de estudiantes matriculados.",
        "Profesor" => "Información de docentes y sus datos académicos.",
        "Empleado" => "Personal administrativo y de servicios.",
        "ProgramaAcademico" => "Carreras profesionales ofrecidas por la universidad.",
        "PlanAcademico" => "Planes de estudio por programa y versión.",
        "Curso" => "Asignaturas del catálogo académico.",
        "CursoOfertado" => "Cursos programados para un periodo académico.",
        "Matricula" => "Inscripción de estudiantes en cursos.",
        "PeriodoAcademico" => "Semestres/ciclos académicos.",
        "Horario" => "Programación de clases (día, hora, aula).",
        "EvaluacionCriterio" => "Criterios de evaluación (exámenes, prácticas).",
        "EvaluacionNota" => "Calificaciones de estudiantes.",
        "AsistenciaAlumno" => "Control de asistencia a clases.",
        "UnidadOrganizativa" => "Estructura organizacional (facultades, escuelas).",
        "Localizacion" => "Espacios físicos (aulas, laboratorios).",
        "Autoridad" => "Cargos directivos (rector, decano, director).",
        "TipoAutoridad" => "Catálogo de tipos de autoridades.",
        "TipoUnidad" => "Catálogo de tipos de unidades organizativas.",
        "TipoLocalizacion" => "Catálogo de tipos de localizaciones.",
        "RequisitoCurso" => "Prerequisitos entre cursos.",
        "PlanCurso" => "Cursos que pertenecen a un plan académico.",
        "AuthUsuario" => "Usuarios del sistema (autenticación).",
        "Rol" => "Roles de acceso (ADMIN, DOCENTE, ESTUDIANTE).",
        "Permiso" => "Permisos granulares del sistema.",
        "RolPermiso" => "Asignación de permisos a roles.",
        "RefreshToken" => "Tokens de refresco JWT.",
        "Pago" => "Registro de pagos realizados.",
        "CuentaCorrienteAlumno" => "Estado de cuenta de estudiantes.",
        "PagoDetalleDeuda" => "Detalle de aplicación de pagos a deudas.",
        "Category" => "Categorías del catálogo general.",
        _ => "",
    }
}
