//! Built-in demo data: four providers, five services and three open tasks
//! around Av. Paulista, São Paulo.

use compact_str::CompactString;
use rust_decimal::Decimal;
use smallvec::smallvec;

use crate::entities::{
    Badge, BadgeIcon, OpenTask, Provider, ProviderStatus, ServiceCategory, ServicePackage,
    ServiceType,
};
use crate::geo::Coordinate;

/// Fixture coordinates are literals inside the valid range.
fn at(latitude: f64, longitude: f64) -> Coordinate {
    Coordinate::new(latitude, longitude).unwrap_or_else(|_| unreachable!())
}

fn badge(id: &str, name: &str, description: &str, icon: BadgeIcon) -> Badge {
    Badge {
        id: CompactString::from(id),
        name: name.to_string(),
        description: description.to_string(),
        icon,
    }
}

fn queue_ninja() -> Badge {
    badge("b1", "Ninja das Filas", "50+ horas em filas completadas", BadgeIcon::Clock)
}

fn dog_whisperer() -> Badge {
    badge("b2", "Encantador de Cães", "50 avaliações 5 estrelas em Pets", BadgeIcon::Dog)
}

fn fast_response() -> Badge {
    badge("b3", "The Flash", "Aceita tarefas em menos de 1 min", BadgeIcon::Zap)
}

fn top_rated() -> Badge {
    badge("b4", "Super Estrela", "Média 5.0 em 20 tarefas", BadgeIcon::Star)
}

fn veteran() -> Badge {
    badge("b5", "Lenda Urbana", "Nível 5 alcançado", BadgeIcon::Trophy)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub(super) fn providers() -> Vec<Provider> {
    vec![
        Provider {
            id: "p1".into(),
            name: "Carlos Silva".to_string(),
            avatar: "https://picsum.photos/100/100?random=1".to_string(),
            rating: 4.8,
            reviews: 124,
            verified: true,
            categories: smallvec![ServiceCategory::Queue],
            hourly_rate: Some(Decimal::from(25)),
            specialties: strings(&["Bancos", "Cartórios", "Ingressos"]),
            bio: "Especialista em burocracia. Tenho paciência infinita para filas.".to_string(),
            location: at(-23.564, -46.652),
            status: ProviderStatus::Available,
            level: 3,
            xp: 2400,
            xp_to_next_level: 3000,
            completed_tasks: 124,
            badges: vec![queue_ninja(), fast_response()],
        },
        Provider {
            id: "p2".into(),
            name: "Fernanda Lima".to_string(),
            avatar: "https://picsum.photos/100/100?random=2".to_string(),
            rating: 4.9,
            reviews: 89,
            verified: true,
            categories: smallvec![ServiceCategory::Pet],
            hourly_rate: None,
            specialties: strings(&["Cães Grandes", "Adestramento Básico"]),
            bio: "Amante de animais e estudante de veterinária. Seu pet em boas mãos.".to_string(),
            location: at(-23.558, -46.660),
            status: ProviderStatus::Available,
            level: 2,
            xp: 1800,
            xp_to_next_level: 2000,
            completed_tasks: 89,
            badges: vec![dog_whisperer()],
        },
        Provider {
            id: "p3".into(),
            name: "Roberto Mendes".to_string(),
            avatar: "https://picsum.photos/100/100?random=3".to_string(),
            rating: 4.7,
            reviews: 210,
            verified: true,
            categories: smallvec![ServiceCategory::Queue, ServiceCategory::Pet],
            hourly_rate: Some(Decimal::from(30)),
            specialties: strings(&["Filas Longas", "Passeios Matinais"]),
            bio: "Versátil e pontual. Economizo seu tempo e cuido do seu melhor amigo."
                .to_string(),
            location: at(-23.568, -46.648),
            status: ProviderStatus::Busy,
            level: 5,
            xp: 8500,
            xp_to_next_level: 10000,
            completed_tasks: 210,
            badges: vec![veteran(), queue_ninja(), dog_whisperer()],
        },
        Provider {
            id: "p4".into(),
            name: "Julia Costa".to_string(),
            avatar: "https://picsum.photos/100/100?random=4".to_string(),
            rating: 5.0,
            reviews: 45,
            verified: true,
            categories: smallvec![ServiceCategory::Pet],
            hourly_rate: None,
            specialties: strings(&["Gatos", "Filhotes", "Cuidados Especiais"]),
            bio: "Certificada em primeiros socorros pet. Cuidado premium.".to_string(),
            location: at(-23.560, -46.658),
            status: ProviderStatus::Available,
            level: 2,
            xp: 1200,
            xp_to_next_level: 2000,
            completed_tasks: 45,
            badges: vec![top_rated()],
        },
    ]
}

fn service(
    id: &str,
    service_type: ServiceType,
    name: &str,
    duration_minutes: u32,
    price_cents: i64,
    description: &str,
    features: &[&str],
) -> ServicePackage {
    ServicePackage {
        id: id.into(),
        service_type,
        category: service_type.category(),
        name: name.to_string(),
        duration_minutes,
        price: Decimal::new(price_cents, 2),
        description: description.to_string(),
        features: strings(features),
    }
}

pub(super) fn services() -> Vec<ServicePackage> {
    vec![
        service(
            "s1",
            ServiceType::BankLine,
            "Espera em Banco",
            60,
            3500,
            "Aguardamos na fila do banco para você.",
            &["Monitoramento em tempo real", "Aviso 15min antes"],
        ),
        service(
            "s2",
            ServiceType::SpotHolder,
            "Segurar Lugar (Shows/Eventos)",
            120,
            8000,
            "Garanta o melhor lugar chegando \"cedo\" sem sair de casa.",
            &["Fotos de comprovação", "Permanência garantida"],
        ),
        service(
            "s3",
            ServiceType::Walk30,
            "Passeio Express (30min)",
            30,
            3500,
            "Ideal para gastar energia rápida e necessidades.",
            &["Mapa do percurso", "Foto ao final", "Hidratação"],
        ),
        service(
            "s4",
            ServiceType::Walk60,
            "Passeio Completo (60min)",
            60,
            5500,
            "Exercício completo para saúde do seu pet.",
            &["Relatório de humor", "Vídeo curto", "Hidratação reforçada"],
        ),
        service(
            "s5",
            ServiceType::WalkPremium,
            "Passeio Premium Monitorado",
            90,
            7900,
            "O máximo de cuidado e atenção exclusiva.",
            &["Monitoramento GPS ao vivo", "Seguro veterinário", "Kit higiene premium"],
        ),
    ]
}

fn task(
    id: &str,
    user_id: &str,
    service_type: ServiceType,
    description: &str,
    location: Coordinate,
    price: i64,
) -> OpenTask {
    OpenTask {
        id: id.into(),
        user_id: user_id.into(),
        service_type,
        category: service_type.category(),
        description: description.to_string(),
        location,
        price: Decimal::from(price),
    }
}

pub(super) fn open_tasks() -> Vec<OpenTask> {
    vec![
        task(
            "t1",
            "u1",
            ServiceType::BankLine,
            "Fila Caixa Econômica - Saque FGTS",
            at(-23.562, -46.654),
            45,
        ),
        task(
            "t2",
            "u2",
            ServiceType::Walk60,
            "Passeio com Labrador - Parque Trianon",
            at(-23.563, -46.657),
            55,
        ),
        task(
            "t3",
            "u3",
            ServiceType::GovBureaucracy,
            "Aguardar senha no Poupatempo",
            at(-23.555, -46.662),
            60,
        ),
    ]
}
