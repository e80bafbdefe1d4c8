use anyhow::{Context, Result};
use rc_client::HttpClient;
use rc_core::model::GraphSummary;

pub async fn run(client: &HttpClient) -> Result<()> {
    let graphs = client.try_list().await.context("failed to list graphs")?;
    if graphs.is_empty() {
        println!("No stored graphs.");
        return Ok(());
    }
    for line in format_table(&graphs) {
        println!("{line}");
    }
    Ok(())
}

fn format_table(graphs: &[GraphSummary]) -> Vec<String> {
    let id_width = graphs
        .iter()
        .map(|g| g.id.to_string().len())
        .max()
        .unwrap_or(1);
    let name_width = graphs.iter().map(|g| g.name.chars().count()).max().unwrap_or(0);
    graphs
        .iter()
        .map(|g| {
            format!("{:>id_width$}  {:<name_width$}  {}", g.id, g.name, g.created_at)
                .trim_end()
                .to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn table_columns_line_up() {
        let graphs = vec![
            GraphSummary {
                id: 12,
                name: "Campus".to_string(),
                created_at: "2024-05-01 10:00:00".to_string(),
            },
            GraphSummary {
                id: 3,
                name: "Old".to_string(),
                created_at: String::new(),
            },
        ];
        assert_eq!(
            format_table(&graphs),
            vec![
                "12  Campus  2024-05-01 10:00:00".to_string(),
                " 3  Old".to_string(),
            ]
        );
    }
}
