// SQL query constants for repositories
// Centralizes repeated column lists and allow-lists

/// SQL query fragments for jobs table
pub mod job_queries {
    use crate::db::sql::FieldMap;

    /// Columns returned for a bare job row
    pub const RETURNING_COLUMNS: &str =
        r#"id, title, salary, equity, company_handle AS "companyHandle""#;

    /// Job columns plus the joined company name, for `jobs j LEFT JOIN companies c`
    pub const LISTING_COLUMNS: &str = r#"j.id,
        j.title,
        j.salary,
        j.equity,
        j.company_handle AS "companyHandle",
        c.name AS "companyName""#;

    /// Fields a partial update may touch; each column carries the field's name
    pub const UPDATE_FIELDS: FieldMap =
        FieldMap::new(&[("title", "title"), ("salary", "salary"), ("equity", "equity")]);
}

/// SQL query fragments for companies table
pub mod company_queries {
    pub const SELECT_ALL_COLUMNS: &str = r#"handle,
        name,
        description,
        num_employees AS "numEmployees",
        logo_url AS "logoUrl""#;
}
