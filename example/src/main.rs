// example/src/main.rs

mod models;

use futures::executor::block_on;
use futures::StreamExt;
use serde_json::json;
use stream_mapper::*;

use models::{Task, User};

fn main() -> Result<(), MapperError> {
    // A stream the way a network client would deliver it: one JSON value per
    // response, with the payload nested under an envelope.
    let responses = from_values(vec![
        json!({"user": {"name": "Alex", "email": "alex@example.com"}}),
        json!({"user": {"name": "Tom"}}),
        json!({"user": {"nickname": "nobody"}}),
    ]);

    let users = block_on(
        responses
            .map_to_type::<User>(Some(Path::from(["user"])))
            .collect::<Vec<_>>(),
    );

    for result in &users {
        match result {
            Ok(user) => println!("user  = {} <{}>", user.name, user.email.as_deref().unwrap_or("-")),
            Err(e) => println!("error = {}", e),
        }
    }

    // Arrays: each task sits one level down inside its element.
    let payload = from_values(vec![json!({
        "taskList": {
            "tasks": [
                {"task": {"name": "Buy milk", "done": true}},
                {"task": {"name": "Write report"}},
            ]
        }
    })]);
    let options = MapOptions::new()
        .with_root(["taskList", "tasks"])
        .with_inner(["task"]);

    let mut tasks = Box::pin(payload.map_to_type_array_with(
        SerdeDecoder::<Task>::new(),
        options.root,
        options.inner,
    ));
    while let Some(batch) = block_on(tasks.next()) {
        for task in batch? {
            println!("task  = {} (done: {})", task.name, task.done);
        }
    }

    // Encoding goes the other way.
    if let Some(Ok(user)) = users.first() {
        println!("json  = {}", serde_json::Value::Object(user.to_json()));
    }

    Ok(())
}
