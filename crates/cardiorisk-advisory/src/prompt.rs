//! Prompt construction for the remote advisory service.

use cardiorisk_common::{PatientProfile, PredictionResult};

fn yes_no(flag: i64) -> &'static str {
    if flag == 1 {
        "sí"
    } else {
        "no"
    }
}

fn gender_label(gender: i64) -> &'static str {
    if gender == 1 {
        "masculino"
    } else {
        "femenino"
    }
}

/// Render the advisory request deterministically: identical profile and
/// prediction pairs produce identical text, which doubles as the cache
/// key for the memoized remote call.
pub fn build_prompt(profile: &PatientProfile, prediction: &PredictionResult) -> String {
    format!(
        "\
Eres un asistente médico profesional y empático. Analiza el perfil de riesgo cardiovascular
y genera recomendaciones personalizadas en español, breves y prácticas.

Datos del paciente:
- Edad: {age}
- Género: {gender}
- Colesterol: {cholesterol} mg/dL
- Presión arterial: {bp} mmHg
- Glucosa: {glucose}
- Estatura: {height} cm
- Peso: {weight} kg
- IMC: {bmi}
- Actividad física: {activity} h/semana
- Fuma: {smoke}
- Alcohol: {alcohol}
- Estrés: {stress}
- Antecedentes familiares: {family}
- Riesgo predicho: {risk} ({prob:.1}%)

Genera:
1. Un resumen del estado (1-2 líneas).
2. Tres recomendaciones a corto, mediano y largo plazo.
3. Una advertencia si hay riesgo alto.
4. Una nota de precaución aclarando que esto no sustituye consulta médica.

Responde SOLO en formato JSON:
{{
  \"summary\": \"...\",
  \"recommendations\": [\"...\", \"...\", \"...\"],
  \"warning\": \"...\",
  \"disclaimer\": \"...\"
}}",
        age = profile.age,
        gender = gender_label(profile.gender),
        cholesterol = profile.cholesterol,
        bp = profile.bp,
        glucose = profile.glucose,
        height = profile.height,
        weight = profile.weight,
        bmi = profile.bmi,
        activity = profile.physical_activity,
        smoke = yes_no(profile.smoke),
        alcohol = yes_no(profile.alcohol),
        stress = profile.stress_level,
        family = yes_no(profile.family_history),
        risk = if prediction.is_high_risk() { "ALTO" } else { "BAJO" },
        prob = prediction.probability * 100.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> PatientProfile {
        PatientProfile {
            age: 58.0,
            gender: 1,
            cholesterol: 260.0,
            bp: 150.0,
            smoke: 1,
            alcohol: 0,
            physical_activity: 1.0,
            glucose: 110.0,
            height: 172.0,
            weight: 85.0,
            bmi: 28.7,
            family_history: 1,
            stress_level: 4.0,
        }
    }

    #[test]
    fn test_prompt_embeds_all_fields_and_labels() {
        let p = build_prompt(&sample_profile(), &PredictionResult::new(1, 0.82));
        assert!(p.contains("- Edad: 58"));
        assert!(p.contains("- Género: masculino"));
        assert!(p.contains("- Colesterol: 260 mg/dL"));
        assert!(p.contains("- Presión arterial: 150 mmHg"));
        assert!(p.contains("- Estatura: 172 cm"));
        assert!(p.contains("- Peso: 85 kg"));
        assert!(p.contains("- Fuma: sí"));
        assert!(p.contains("- Alcohol: no"));
        assert!(p.contains("- Antecedentes familiares: sí"));
        assert!(p.contains("ALTO (82.0%)"));
    }

    #[test]
    fn test_low_risk_label_and_percentage_precision() {
        let p = build_prompt(&PatientProfile::default(), &PredictionResult::new(0, 0.1234));
        assert!(p.contains("BAJO (12.3%)"));
        assert!(p.contains("- Género: femenino"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let profile = sample_profile();
        let prediction = PredictionResult::new(1, 0.82);
        assert_eq!(
            build_prompt(&profile, &prediction),
            build_prompt(&profile, &prediction)
        );
    }
}
