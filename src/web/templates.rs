//! HTML page templates.

use askama::Template;
use axum::response::Html;

use crate::consulta::Consulta;
use crate::error::Result;

/// Landing page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {}

/// Empty creation form.
#[derive(Template)]
#[template(path = "inserir.html")]
pub struct CreatePage {}

/// Table of every record.
#[derive(Template)]
#[template(path = "listar.html")]
pub struct ListPage {
    pub consultas: Vec<Consulta>,
}

/// Edit form pre-filled with one record.
#[derive(Template)]
#[template(path = "atualizar.html")]
pub struct EditPage {
    pub consulta: Consulta,
}

/// Render a template into an HTML response body.
pub fn render<T: Template>(page: &T) -> Result<Html<String>> {
    Ok(Html(page.render()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn consulta(id: u64) -> Consulta {
        Consulta {
            id,
            nome: "Ana".to_string(),
            data_nascimento: "2000-01-01".to_string(),
            data_atendimento: "2024-05-01".to_string(),
            horario: "10:00".to_string(),
            tipo: "rotina".to_string(),
        }
    }

    #[test]
    fn empty_listing_has_no_rows() {
        let html = ListPage { consultas: Vec::new() }.render().unwrap();
        assert_eq!(html.matches("data-id=").count(), 0);
        assert!(html.contains("Nenhuma consulta cadastrada."));
    }

    #[test]
    fn listing_renders_one_row_per_record() {
        let html = ListPage {
            consultas: vec![consulta(1), consulta(2)],
        }
        .render()
        .unwrap();
        assert_eq!(html.matches("data-id=").count(), 2);
        assert!(html.contains(r#"action="/excluir/2""#));
        assert!(html.contains(r#"href="/atualizar/1""#));
    }

    #[test]
    fn edit_page_is_prefilled() {
        let html = EditPage { consulta: consulta(3) }.render().unwrap();
        assert!(html.contains(r#"action="/atualizar/3""#));
        assert!(html.contains(r#"name="nome" value="Ana""#));
        assert!(html.contains(r#"name="horario" value="10:00""#));
    }

    #[test]
    fn record_fields_are_escaped() {
        let mut record = consulta(4);
        record.nome = "<script>".to_string();
        let html = ListPage { consultas: vec![record] }.render().unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn creation_form_posts_to_inserir() {
        let html = CreatePage {}.render().unwrap();
        assert!(html.contains(r#"action="/inserir""#));
        for field in ["nome", "data_nascimento", "data_atendimento", "horario", "tipo"] {
            assert!(html.contains(&format!(r#"name="{field}""#)));
        }
    }
}
