mod auth_test;
mod classes_test;
mod evaluations_test;
mod health_test;
mod projects_test;
