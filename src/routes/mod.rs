pub mod health;
pub mod tasks;
pub mod users;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user")
            .service(users::register)
            .service(users::login)
            .service(users::refresh)
            .service(users::logout),
    )
    .service(
        // Literal segments before the `{id}` catch-alls.
        web::scope("/tasks")
            .service(tasks::list_tasks)
            .service(tasks::list_user_tasks)
            .service(tasks::create_task)
            .service(tasks::update_task)
            .service(tasks::get_task)
            .service(tasks::delete_task),
    );
}
