//! Demo catalog: Colombian owners and properties used to populate a fresh
//! database.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use property_core::{Owner, Property, PropertyImage, TraceEntropy};
use rust_decimal::Decimal;

struct OwnerSeed {
    name: &'static str,
    address: &'static str,
    photo: &'static str,
    birthday: (i32, u32, u32),
    days_ago: i64,
}

struct PropertySeed {
    name: &'static str,
    address: &'static str,
    price: i64,
    code_internal: &'static str,
    year: i32,
    /// Index into the owner list
    owner: usize,
    hours_ago: i64,
}

const OWNERS: &[OwnerSeed] = &[
    OwnerSeed {
        name: "María González Rodríguez",
        address: "Carrera 15 #93-47, Bogotá, Cundinamarca",
        photo: "https://images.unsplash.com/photo-1494790108755-2616b612b786?w=150&h=150&fit=crop&crop=face",
        birthday: (1985, 3, 15),
        days_ago: 45,
    },
    OwnerSeed {
        name: "Carlos Alberto Pérez",
        address: "Calle 127 #15-32, Bogotá, Cundinamarca",
        photo: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=150&h=150&fit=crop&crop=face",
        birthday: (1978, 7, 22),
        days_ago: 30,
    },
    OwnerSeed {
        name: "Ana Lucía Martínez",
        address: "Avenida 68 #25-41, Medellín, Antioquia",
        photo: "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=150&h=150&fit=crop&crop=face",
        birthday: (1990, 11, 8),
        days_ago: 20,
    },
    OwnerSeed {
        name: "Roberto Silva Herrera",
        address: "Carrera 50 #26-20, Cali, Valle del Cauca",
        photo: "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=150&h=150&fit=crop&crop=face",
        birthday: (1982, 1, 30),
        days_ago: 15,
    },
    OwnerSeed {
        name: "Isabel Cristina López",
        address: "Calle 100 #11-15, Bogotá, Cundinamarca",
        photo: "https://images.unsplash.com/photo-1544005313-94ddf0286df2?w=150&h=150&fit=crop&crop=face",
        birthday: (1987, 5, 12),
        days_ago: 10,
    },
    OwnerSeed {
        name: "Diego Fernando Ramírez",
        address: "Carrera 7 #32-16, Bogotá, Cundinamarca",
        photo: "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=150&h=150&fit=crop&crop=face",
        birthday: (1992, 9, 3),
        days_ago: 5,
    },
    OwnerSeed {
        name: "Patricia Morales Vega",
        address: "Avenida 19 #104-07, Bogotá, Cundinamarca",
        photo: "https://images.unsplash.com/photo-1487412720507-e7ab37603c6f?w=150&h=150&fit=crop&crop=face",
        birthday: (1980, 12, 18),
        days_ago: 2,
    },
    OwnerSeed {
        name: "Andrés Felipe Castro",
        address: "Calle 85 #11-30, Bogotá, Cundinamarca",
        photo: "https://images.unsplash.com/photo-1506794778202-cad84cf45f1d?w=150&h=150&fit=crop&crop=face",
        birthday: (1988, 4, 25),
        days_ago: 1,
    },
];

const PROPERTIES: &[PropertySeed] = &[
    PropertySeed {
        name: "Apartamento Zona Rosa",
        address: "Carrera 15 #93-47, Zona Rosa, Bogotá",
        price: 850_000_000,
        code_internal: "APT-001-2024",
        year: 2020,
        owner: 0,
        hours_ago: 40 * 24,
    },
    PropertySeed {
        name: "Casa Familiar Chapinero",
        address: "Calle 127 #15-32, Chapinero, Bogotá",
        price: 1_200_000_000,
        code_internal: "CASA-002-2024",
        year: 2018,
        owner: 1,
        hours_ago: 35 * 24,
    },
    PropertySeed {
        name: "Penthouse El Poblado",
        address: "Avenida 68 #25-41, El Poblado, Medellín",
        price: 1_500_000_000,
        code_internal: "PENT-003-2024",
        year: 2021,
        owner: 2,
        hours_ago: 25 * 24,
    },
    PropertySeed {
        name: "Oficina Centro Comercial",
        address: "Carrera 50 #26-20, Centro, Cali",
        price: 450_000_000,
        code_internal: "OFI-004-2024",
        year: 2019,
        owner: 3,
        hours_ago: 20 * 24,
    },
    PropertySeed {
        name: "Apartamento Usaquén",
        address: "Calle 100 #11-15, Usaquén, Bogotá",
        price: 680_000_000,
        code_internal: "APT-005-2024",
        year: 2022,
        owner: 4,
        hours_ago: 15 * 24,
    },
    PropertySeed {
        name: "Casa Campestre La Calera",
        address: "Carrera 7 #32-16, La Calera, Cundinamarca",
        price: 2_200_000_000,
        code_internal: "CASA-006-2024",
        year: 2017,
        owner: 5,
        hours_ago: 12 * 24,
    },
    PropertySeed {
        name: "Apartamento Teusaquillo",
        address: "Avenida 19 #104-07, Teusaquillo, Bogotá",
        price: 720_000_000,
        code_internal: "APT-007-2024",
        year: 2020,
        owner: 6,
        hours_ago: 8 * 24,
    },
    PropertySeed {
        name: "Local Comercial Zona T",
        address: "Calle 85 #11-30, Zona T, Bogotá",
        price: 320_000_000,
        code_internal: "LOC-008-2024",
        year: 2023,
        owner: 7,
        hours_ago: 3 * 24,
    },
    PropertySeed {
        name: "Apartamento Rosales",
        address: "Carrera 11 #84-25, Rosales, Bogotá",
        price: 950_000_000,
        code_internal: "APT-009-2024",
        year: 2021,
        owner: 0,
        hours_ago: 24,
    },
    PropertySeed {
        name: "Casa Barrio La Candelaria",
        address: "Calle 10 #3-15, La Candelaria, Bogotá",
        price: 1_800_000_000,
        code_internal: "CASA-010-2024",
        year: 2015,
        owner: 1,
        hours_ago: 12,
    },
];

const IMAGE_URLS: &[&str] = &[
    "https://images.unsplash.com/photo-1560448204-e02f11c3d0e2?w=800&h=600&fit=crop",
    "https://images.unsplash.com/photo-1564013799919-ab600027ffc6?w=800&h=600&fit=crop",
    "https://images.unsplash.com/photo-1512917774080-9991f1c4c750?w=800&h=600&fit=crop",
    "https://images.unsplash.com/photo-1600596542815-ffad4c1539a9?w=800&h=600&fit=crop",
    "https://images.unsplash.com/photo-1600607687939-ce8a6c25118c?w=800&h=600&fit=crop",
    "https://images.unsplash.com/photo-1600607687644-c7171b42498b?w=800&h=600&fit=crop",
    "https://images.unsplash.com/photo-1600566753190-17f0baa2a6c3?w=800&h=600&fit=crop",
    "https://images.unsplash.com/photo-1600566753086-00f18fb6b3ea?w=800&h=600&fit=crop",
    "https://images.unsplash.com/photo-1600566752355-35792bedcfea?w=800&h=600&fit=crop",
    "https://images.unsplash.com/photo-1600566753376-12c8ab7fb75b?w=800&h=600&fit=crop",
];

pub fn demo_owners<E>(now: DateTime<Utc>, entropy: &mut E) -> Vec<Owner>
where
    E: TraceEntropy + ?Sized,
{
    OWNERS
        .iter()
        .map(|seed| {
            let (y, m, d) = seed.birthday;
            Owner {
                id: entropy.draw_id().to_string(),
                name: seed.name.to_string(),
                address: Some(seed.address.to_string()),
                photo: Some(seed.photo.to_string()),
                birthday: NaiveDate::from_ymd_opt(y, m, d),
                created_at: now - Duration::days(seed.days_ago),
                updated_at: None,
            }
        })
        .collect()
}

/// Properties bound to `owners`. Seeds pointing past the end of the owner
/// list wrap around.
pub fn demo_properties<E>(owners: &[Owner], now: DateTime<Utc>, entropy: &mut E) -> Vec<Property>
where
    E: TraceEntropy + ?Sized,
{
    if owners.is_empty() {
        return Vec::new();
    }

    PROPERTIES
        .iter()
        .map(|seed| Property {
            id: entropy.draw_id().to_string(),
            owner_id: owners[seed.owner % owners.len()].id.clone(),
            name: seed.name.to_string(),
            address: seed.address.to_string(),
            price: Decimal::from(seed.price),
            code_internal: seed.code_internal.to_string(),
            year: seed.year,
            created_at: now - Duration::hours(seed.hours_ago),
            updated_at: None,
        })
        .collect()
}

/// One enabled image per property, cycling through the stock photos
pub fn demo_images<E>(properties: &[Property], entropy: &mut E) -> Vec<PropertyImage>
where
    E: TraceEntropy + ?Sized,
{
    properties
        .iter()
        .enumerate()
        .map(|(i, property)| PropertyImage {
            id: entropy.draw_id().to_string(),
            property_id: property.id.clone(),
            file: IMAGE_URLS[i % IMAGE_URLS.len()].to_string(),
            enabled: true,
            created_at: property.created_at,
            updated_at: None,
        })
        .collect()
}
