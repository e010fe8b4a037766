use crate::entities::{ServiceCategory, ServiceType};

pub const PET_ADVISOR_INSTRUCTION: &str = "Você é um especialista em cuidados animais do app Help-Me Pet Care. Ajude o dono a escolher o melhor passeio.";
pub const QUEUE_ADVISOR_INSTRUCTION: &str = "Você é um especialista em gestão de tempo do app Help-Me Fila & Espera. Ajude o usuário a economizar tempo.";

pub fn advisor_instruction(category: ServiceCategory) -> &'static str {
    match category {
        ServiceCategory::Pet => PET_ADVISOR_INSTRUCTION,
        ServiceCategory::Queue => QUEUE_ADVISOR_INSTRUCTION,
    }
}

fn tone(category: ServiceCategory) -> &'static str {
    match category {
        ServiceCategory::Pet => "O tom deve ser confiável e atencioso. Mencione o bem-estar do animal.",
        ServiceCategory::Queue => "O tom deve ser confiável e atencioso. Mencione a eficiência.",
    }
}

/// Prompt asking for a short client-facing summary of a finished service.
pub fn service_report(service_type: ServiceType, raw_notes: &str, duration_minutes: u32) -> String {
    format!(
        "Você é um assistente inteligente do aplicativo \"Help-Me\".\n\
         Gere um relatório amigável e profissional para o cliente sobre o serviço realizado.\n\
         \n\
         Tipo de Serviço: {}\n\
         Duração: {duration_minutes} minutos\n\
         Notas do Prestador (brutas): {}\n\
         \n\
         {}\n\
         Seja conciso (máximo 3 frases).",
        service_type.label(),
        raw_notes.trim(),
        tone(service_type.category()),
    )
}
