//! Rule-table recommendations used when the remote advisory is
//! unavailable.
//!
//! Rule order is fixed and load-bearing: the fallback bundle keeps only
//! the first three lines, so the prediction headline stays first and the
//! threshold rules fire in the order written here.

use cardiorisk_common::{AdvisoryBundle, PatientProfile, PredictionResult};

pub const FALLBACK_SUMMARY: &str = "Resultado generado localmente.";
pub const DISCLAIMER: &str =
    "Esta información es automática y no sustituye la consulta médica.";

/// Maximum recommendation lines surfaced in a fallback bundle.
const FALLBACK_LINES: usize = 3;

/// Apply the fixed threshold rules in order, each appending at most one
/// line. Pure and total: never fails, for any profile.
pub fn rule_based_recommendations(
    profile: &PatientProfile,
    prediction: &PredictionResult,
) -> Vec<String> {
    let mut recs = Vec::new();

    if prediction.is_high_risk() {
        recs.push("⚠️ Riesgo cardiovascular detectado. Consulte un médico pronto.".to_string());
    } else {
        recs.push("✅ Riesgo bajo detectado. Mantenga hábitos saludables.".to_string());
    }

    if profile.cholesterol > 240.0 {
        recs.push(
            "Nivel de colesterol alto: reduzca grasas saturadas y aumente frutas y fibra."
                .to_string(),
        );
    }
    if profile.bp > 140.0 {
        recs.push("Presión arterial elevada: controle el estrés y limite el consumo de sal."
            .to_string());
    }
    if profile.smoke == 1 {
        recs.push("Fumar aumenta el riesgo cardíaco. Busque ayuda para dejarlo.".to_string());
    }
    if profile.alcohol == 1 {
        recs.push("Modere el consumo de alcohol; afecta presión y corazón.".to_string());
    }
    if profile.physical_activity < 3.0 {
        recs.push("Aumente su actividad física a al menos 150 minutos semanales.".to_string());
    }
    if profile.stress_level > 3.0 {
        recs.push("Niveles altos de estrés: practique relajación o meditación.".to_string());
    }
    if profile.family_history == 1 {
        recs.push(
            "Antecedentes familiares: realice chequeos preventivos con más frecuencia."
                .to_string(),
        );
    }

    recs.push("Monitoree peso, colesterol y presión periódicamente.".to_string());
    recs
}

/// Deterministic local substitute for the remote advisory bundle: the
/// first three rule lines, fixed summary and disclaimer, empty warning.
pub fn fallback_bundle(profile: &PatientProfile, prediction: &PredictionResult) -> AdvisoryBundle {
    let mut recommendations = rule_based_recommendations(profile, prediction);
    recommendations.truncate(FALLBACK_LINES);
    AdvisoryBundle {
        summary: FALLBACK_SUMMARY.to_string(),
        recommendations,
        warning: String::new(),
        disclaimer: DISCLAIMER.to_string(),
    }
}
