use crate::{
    entities::department::Department,
    errors::AppError,
    repositories::department::DepartmentRepository,
};

pub struct DepartmentHandler<R>
where
    R: DepartmentRepository,
{
    pub department_repo: R,
}

impl<R> DepartmentHandler<R>
where
    R: DepartmentRepository,
{
    pub fn new(department_repo: R) -> Self {
        DepartmentHandler { department_repo }
    }

    pub async fn list_departments(&self) -> Result<Vec<Department>, AppError> {
        self.department_repo.list_departments().await
    }
}
