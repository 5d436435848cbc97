use crate::entities::departments;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use std::collections::{HashMap, HashSet};

pub mod course;
pub mod department;
pub mod enrollment;
pub mod lecturer;
pub mod seed;
pub mod staff;
pub mod student;

/// Case-insensitive substring match on a text column
pub(crate) fn ilike(column: &str, needle: &str) -> SimpleExpr {
    Expr::cust_with_expr(format!("{column} ILIKE $1"), format!("%{needle}%"))
}

/// Case-insensitive substring match against any element of a text-array column
pub(crate) fn array_ilike(column: &str, needle: &str) -> SimpleExpr {
    Expr::cust_with_expr(
        format!("array_to_string({column}, ';') ILIKE $1"),
        format!("%{needle}%"),
    )
}

/// Batch-resolve department names for the given (possibly repeated) ids
pub(crate) async fn department_names(
    db: &DatabaseConnection,
    ids: impl Iterator<Item = i32>,
) -> Result<HashMap<i32, String>, DbErr> {
    let unique: Vec<i32> = ids.collect::<HashSet<_>>().into_iter().collect();
    if unique.is_empty() {
        return Ok(HashMap::new());
    }
    Ok(departments::Entity::find()
        .filter(departments::Column::Id.is_in(unique))
        .all(db)
        .await?
        .into_iter()
        .map(|department| (department.id, department.name))
        .collect())
}

/// Splits legacy `;`-delimited list input. Only used when ingesting seed data;
/// list fields are stored as real string arrays.
pub fn split_delimited(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::split_delimited;

    #[test]
    fn splits_delimited_values() {
        assert_eq!(
            split_delimited("Machine Learning;Neural Networks"),
            vec!["Machine Learning", "Neural Networks"]
        );
    }

    #[test]
    fn empty_input_yields_empty_list() {
        assert_eq!(split_delimited(""), Vec::<String>::new());
        assert_eq!(split_delimited(";;"), Vec::<String>::new());
    }

    #[test]
    fn trims_whitespace_around_entries() {
        assert_eq!(
            split_delimited("AI; Deep Learning ;"),
            vec!["AI", "Deep Learning"]
        );
    }
}
