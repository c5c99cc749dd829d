// Navigation links into the grid view
use urlencoding::encode;

pub fn dag_grid(dag_id: &str) -> String {
    format!("/dags/{}/grid", encode(dag_id))
}

pub fn dag_run_grid(dag_id: &str, run_id: &str) -> String {
    format!("{}?dag_run_id={}", dag_grid(dag_id), encode(run_id))
}

/// Mapped instances (`map_index >= 0`) also select their map index
pub fn task_instance_grid(dag_id: &str, run_id: &str, task_id: &str, map_index: i64) -> String {
    let mut link = format!("{}&task_id={}", dag_run_grid(dag_id, run_id), encode(task_id));
    if map_index >= 0 {
        link.push_str(&format!("&map_index={}", map_index));
    }
    link
}
