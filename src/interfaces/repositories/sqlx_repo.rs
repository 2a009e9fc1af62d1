use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxDepartmentRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxUserRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxSkillRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxValidationRepo {
    pub pool: PgPool,
}
