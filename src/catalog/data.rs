//! Static option tables served by [`super::StaticCatalog`].

use super::{CatalogOption, ModuleEntry};

const fn task(
    id: &'static str,
    label: &'static str,
    description: &'static str,
    badge: Option<&'static str>,
) -> CatalogOption {
    CatalogOption {
        id,
        label,
        sub_label: None,
        description: Some(description),
        badge,
        benefit: None,
        risk: None,
        reasoning: None,
    }
}

const fn insight(
    id: &'static str,
    label: &'static str,
    sub_label: &'static str,
    reasoning: &'static str,
) -> CatalogOption {
    CatalogOption {
        id,
        label,
        sub_label: Some(sub_label),
        description: None,
        badge: None,
        benefit: None,
        risk: None,
        reasoning: Some(reasoning),
    }
}

pub(super) const DATA_ANALYTICS_TASKS: &[CatalogOption] = &[
    task("kpi-dashboard", "Dashboard Ejecutivo de KPIs", "Visibilidad en tiempo real de métricas clave.", Some("ALTO IMPACTO")),
    task("data-warehouse", "Setup de Data Warehouse", "Centralizar datos de múltiples fuentes.", Some("INFRAESTRUCTURA")),
    task("predictive-analytics", "Modelo Predictivo de Ventas", "Proyectar tendencias futuras.", Some("IA AVANZADA")),
    task("customer-segmentation", "Segmentación de Clientes", "Agrupar clientes por comportamiento.", Some("MARKETING")),
    task("marketing-attribution", "Atribución de Marketing", "Medir ROI por canal.", None),
    task("inventory-optimization", "Optimización de Inventario", "Reducir stockouts y sobrestock.", Some("EFICIENCIA")),
    task("fraud-detection", "Sistema de Detección de Fraude", "Identificar transacciones anómalas.", None),
    task("churn-prediction", "Predicción de Fuga (Churn)", "Identificar clientes en riesgo.", Some("RETENCIÓN")),
    task("sentiment-analysis", "Análisis de Sentimiento", "Analizar feedback de clientes.", None),
    task("custom-report", "Automatización de Reportes", "Eliminar reportes manuales en Excel.", Some("AHORRO TIEMPO")),
];

pub(super) const AI_TASKS: &[CatalogOption] = &[
    task("chatbot-sales", "Chatbot de Ventas AI", "Automatizar calificación de leads 24/7.", Some("VENTAS 24/7")),
    task("content-generation", "Generador de Contenido", "Posts, emails y copys automáticos.", Some("MARKETING")),
    task("lead-scoring", "Lead Scoring Predictivo", "Priorizar leads por probabilidad de cierre.", Some("EFICIENCIA")),
    task("image-recognition", "Reconocimiento de Imágenes", "Control de calidad visual automático.", None),
    task("voice-assistant", "Asistente de Voz Interno", "Consultas a bases de datos por voz.", None),
    task("personalization", "Personalización Web", "Contenido dinámico por usuario.", Some("UX")),
    task("legal-doc-review", "Revisor Legal AI", "Resumir y marcar riesgos en contratos.", None),
    task("hr-screening", "Filtrado de CVs", "Selección de candidatos por skills.", None),
    task("meeting-summarizer", "Resumidor de Reuniones", "Transcribir y extraer tareas.", Some("PRODUCTIVIDAD")),
    task("custom-agent", "Agente AI a Medida", "Tareas especializadas de nicho.", None),
];

pub(super) const DEFAULT_TASKS: &[CatalogOption] = &[
    task("mvp-development", "Desarrollo de MVP", "Producto Mínimo Viable.", Some("STARTUP")),
    task("process-automation", "Automatización de Procesos", "Digitalizar flujos manuales.", Some("EFICIENCIA")),
    task("legacy-modernization", "Modernización de Legacy", "Actualizar sistemas antiguos.", None),
    task("platform-integration", "Integración de Plataformas", "Conectar herramientas aisladas.", Some("CONECTIVIDAD")),
    task("cloud-migration", "Migración a la Nube", "Pasar servidores locales a Cloud.", Some("ESCALABILIDAD")),
    task("security-audit", "Auditoría de Ciberseguridad", "Identificar vulnerabilidades.", Some("CRÍTICO")),
    task("mobile-app", "App Móvil (iOS/Android)", "Aplicación nativa o híbrida.", Some("MOVILIDAD")),
    task("ecommerce-setup", "Lanzamiento E-commerce", "Tienda online Shopify/WooCommerce.", Some("VENTAS")),
    task("crm-implementation", "Implementación CRM", "Setup de Salesforce/HubSpot.", None),
    task("custom-consulting", "Consultoría Estratégica", "Roadmap y asesoramiento tecnológico.", None),
];

pub(super) const TIME_ESTIMATES: &[CatalogOption] = &[
    CatalogOption {
        id: "express",
        label: "Sprint de Lanzamiento (5 Semanas)",
        sub_label: Some("Ejecución Rápida"),
        description: None,
        badge: None,
        benefit: Some("Ideal para validación rápida en mercado."),
        risk: Some("Documentación técnica simplificada y deuda técnica potencial."),
        reasoning: Some("Sprint Intensivo. Pros: Feedback inmediato del mercado. Contras: Alta carga de trabajo y menor tiempo para iterar detalles estéticos."),
    },
    CatalogOption {
        id: "standard",
        label: "Ciclo de Implementación Estándar (6 Semanas)",
        sub_label: Some("Opción Recomendada"),
        description: None,
        badge: None,
        benefit: Some("Equilibrio óptimo entre velocidad y calidad."),
        risk: Some("Requiere coordinación fluida para no generar bloqueos."),
        reasoning: Some("Ritmo Estándar. Pros: Permite 1 semana de QA y pruebas de usuario. Contras: Requiere coordinación fluida para no atrasarse."),
    },
    CatalogOption {
        id: "comprehensive",
        label: "Despliegue de Alta Disponibilidad (7 Semanas)",
        sub_label: Some("Enfoque Robusto"),
        description: None,
        badge: None,
        benefit: Some("Enfoque en escalabilidad y seguridad a largo plazo."),
        risk: Some("Time-to-market más lento."),
        reasoning: Some("Holgura Estratégica. Pros: Mayor seguridad técnica y pulido final. Ideal si hay integraciones complejas. Contras: Time-to-market más lento."),
    },
];

pub(super) const TEAM_SUGGESTIONS: &[CatalogOption] = &[
    insight("lean", "3 Personas", "Equipo Ágil", "Ideal para validación rápida. Roles sugeridos: 1 Dev Fullstack, 1 Diseñador/PM, 1 Especialista del dominio. Menor costo de coordinación."),
    insight("full", "5 Personas", "Célula Estándar", "Balance perfecto. Roles sugeridos: 2 Devs, 1 UX/UI, 1 PM, 1 QA. Permite paralelizar tareas frontend y backend."),
    insight("enterprise", "7 Personas", "Escuadra Completa", "Alta velocidad. Incluye especialistas dedicados (DevOps, Data Scientist). Requiere una gestión de proyecto rigurosa."),
];

pub(super) const BUDGET_TIERS: &[CatalogOption] = &[
    insight("low", "Bajo (Juniors/Estudiantes)", "Económico", "Talento emergente. Pros: Costo muy accesible ($1k - $3k aprox). Contras: Requiere mucha supervisión tuya y la curva de aprendizaje puede retrasar el plan."),
    insight("mid", "Medio (Profesionales)", "Balanceado", "Freelancers con experiencia. Pros: Buena relación calidad-precio ($5k - $12k). Saben auto-gestionarse. Contras: Disponibilidad variable."),
    insight("high", "Alto (Agencias/Expertos)", "Premium", "Socio Tecnológico. Pros: Garantía de resultados, equipo multidisciplinario y soporte post-lanzamiento ($15k+). Contras: Inversión significativa."),
];

pub(super) const CUSTOM_TASK: CatalogOption = CatalogOption {
    id: super::CUSTOM_TASK_ID,
    label: "Otra tarea",
    sub_label: Some("Escribir"),
    description: Some("Describe tu propio proyecto con tus palabras."),
    badge: None,
    benefit: None,
    risk: None,
    reasoning: None,
};

pub(super) const GOAL_CHOICES: &[CatalogOption] = &[
    CatalogOption {
        id: super::GOAL_GUIDE_ID,
        label: "Responder preguntas guía",
        sub_label: Some("Recomendado"),
        description: Some("Te haré una pregunta para afinar el objetivo principal."),
        badge: None,
        benefit: None,
        risk: None,
        reasoning: None,
    },
    CatalogOption {
        id: super::GOAL_SKIP_ID,
        label: "Saltar y ver el resumen",
        sub_label: None,
        description: Some("Generar el resumen con la información actual."),
        badge: None,
        benefit: None,
        risk: None,
        reasoning: None,
    },
];

pub(super) const MODULES: &[ModuleEntry] = &[
    ModuleEntry { id: "data", title: "Data Analytics", description: "Unlock insights from your business data" },
    ModuleEntry { id: "marketing", title: "Digital Marketing", description: "Optimize campaigns and reach" },
    ModuleEntry { id: "security", title: "Cybersecurity", description: "Protect digital assets and compliance" },
    ModuleEntry { id: "automation", title: "Automations", description: "Streamline repetitive workflows" },
    ModuleEntry { id: "ai", title: "AI Integration", description: "Deploy intelligent agents & models" },
    ModuleEntry { id: "coding", title: "Programming", description: "Custom software development" },
    ModuleEntry { id: "dashboards", title: "Dashboards", description: "Real-time KPI visualization" },
    ModuleEntry { id: "other", title: "Other / Custom", description: "Specialized consulting needs" },
];
