//! Single-record lookup over a Consulta listing.
//!
//! The API has no fetch-by-id endpoint, so the edit form scans the full
//! listing. Route code only calls [`find_by_id`], so a dedicated lookup
//! endpoint can replace the scan here.

use super::types::Consulta;

/// First record in `consultas` whose id equals `id`.
pub fn find_by_id(consultas: Vec<Consulta>, id: u64) -> Option<Consulta> {
    consultas.into_iter().find(|consulta| consulta.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn consulta(id: u64, nome: &str) -> Consulta {
        Consulta {
            id,
            nome: nome.to_string(),
            data_nascimento: "1990-02-03".to_string(),
            data_atendimento: "2024-06-10".to_string(),
            horario: "09:30".to_string(),
            tipo: "retorno".to_string(),
        }
    }

    #[test]
    fn finds_matching_record() {
        let found = find_by_id(vec![consulta(1, "Ana"), consulta(2, "Bruno")], 2);
        assert_eq!(found.map(|c| c.nome), Some("Bruno".to_string()));
    }

    #[test]
    fn returns_first_of_duplicate_ids() {
        let found = find_by_id(vec![consulta(4, "Carla"), consulta(4, "Davi")], 4);
        assert_eq!(found.map(|c| c.nome), Some("Carla".to_string()));
    }

    #[test]
    fn missing_id_is_none() {
        assert!(find_by_id(vec![consulta(1, "Ana")], 9).is_none());
        assert!(find_by_id(Vec::new(), 1).is_none());
    }
}
