use crate::domain::{CurrentTaskSummary, Member, Priority, Project, Status, Task};
use crate::store::Store;
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn member(id: i64, name: &str, role: &str) -> Member {
    Member {
        avatar: format!("avatars/{}.png", id),
        ..Member::new(id, name, role)
    }
}

fn summary(task: &str, assignee: &str, due: NaiveDate) -> CurrentTaskSummary {
    CurrentTaskSummary {
        task: task.to_string(),
        assignee: assignee.to_string(),
        due_date: due,
    }
}

pub fn mock_projects() -> Vec<Project> {
    vec![
        Project {
            description: "Building a modern e-commerce platform with React and Node.js".to_string(),
            image: "images/ecommerce.jpg".to_string(),
            progress: 75,
            status: Status::InProgress,
            members: vec![
                member(1, "Somchai Jaidee", "Project Manager"),
                member(2, "Somying Rakngan", "Frontend Developer"),
                member(3, "Wichan Codedee", "Backend Developer"),
            ],
            current_tasks: vec![
                summary("Shopping Cart UI", "Somying Rakngan", date(2024, 2, 20)),
                summary("Payment API Integration", "Wichan Codedee", date(2024, 2, 22)),
            ],
            ..Project::new(1, "E-commerce Platform", date(2024, 3, 15))
        },
        Project {
            description: "Secure mobile banking application with biometric authentication"
                .to_string(),
            image: "images/banking.jpg".to_string(),
            progress: 45,
            status: Status::InProgress,
            members: vec![
                member(4, "Prayut Mue-pro", "Mobile Developer"),
                member(5, "Orathai Design", "UI/UX Designer"),
            ],
            current_tasks: vec![
                summary("Biometric Authentication", "Prayut Mue-pro", date(2024, 2, 25)),
                summary("User Interface Design", "Orathai Design", date(2024, 2, 18)),
            ],
            ..Project::new(2, "Mobile Banking App", date(2024, 4, 30))
        },
        Project {
            description: "Real-time analytics dashboard for business intelligence".to_string(),
            image: "images/analytics.jpg".to_string(),
            progress: 90,
            status: Status::Review,
            members: vec![
                member(6, "Data Wikhro", "Data Analyst"),
                member(7, "Chart Graphic", "Frontend Developer"),
            ],
            current_tasks: vec![
                summary("Performance Optimization", "Data Wikhro", date(2024, 2, 16)),
                summary("Final UI Polish", "Chart Graphic", date(2024, 2, 17)),
            ],
            ..Project::new(3, "Data Analytics Dashboard", date(2024, 2, 28))
        },
    ]
}

pub fn mock_tasks() -> Vec<Task> {
    let task = |id, title: &str, project_id, assignee_id, status, priority, due| Task {
        id,
        title: title.to_string(),
        project_id: Some(project_id),
        assignee_id: Some(assignee_id),
        status,
        priority,
        due_date: Some(due),
        created_at: None,
    };
    vec![
        task(1, "Design Homepage", 1, 2, Status::InProgress, Priority::High, date(2024, 2, 20)),
        task(2, "Setup Database", 1, 3, Status::Done, Priority::High, date(2024, 2, 15)),
        task(3, "User Authentication", 2, 4, Status::InProgress, Priority::Medium, date(2024, 2, 25)),
        task(4, "Data Visualization", 3, 6, Status::Review, Priority::Low, date(2024, 2, 16)),
    ]
}

/// Store populated with the mock projects and tasks
pub fn mock_store() -> Store {
    Store::new(mock_projects(), mock_tasks())
}
