use crate::entities::{
    course_offerings, courses, departments, enrollments, enrollments::EnrollmentStatus, lecturers,
    non_academic_staff, programs, project_team_members, research_projects, students,
};
use crate::services::lecturer::LecturerService;
use crate::services::split_delimited;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    TransactionTrait,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

pub struct SeedService;

impl SeedService {
    /// Insert the demo dataset in dependency order inside one transaction.
    /// Returns `false` without touching anything when departments already
    /// exist.
    pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<bool, DbErr> {
        if departments::Entity::find().count(db).await? > 0 {
            return Ok(false);
        }

        let txn = db.begin().await?;

        let cs = departments::ActiveModel {
            name: Set("Computer Science".into()),
            faculty: Set("Engineering".into()),
            research_areas: Set(split_delimited("Artificial Intelligence;Cybersecurity")),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        let maths = departments::ActiveModel {
            name: Set("Mathematics".into()),
            faculty: Set("Science".into()),
            research_areas: Set(split_delimited("Statistics;Number Theory")),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let smith = lecturers::ActiveModel {
            name: Set("Dr. Alice Smith".into()),
            email: Set("a.smith@uni.ac.uk".into()),
            academic_qualifications: Set("PhD in Computer Science".into()),
            employment_type: Set("Full-Time".into()),
            contract_details: Set(Some("Permanent".into())),
            areas_of_expertise: Set(split_delimited("AI;Machine Learning;Deep Learning")),
            research_interests: Set(split_delimited("Machine Learning;Neural Networks")),
            publications: Set(split_delimited(
                "Attention Mechanisms Revisited;Graph Networks in Practice",
            )),
            course_load: Set(0),
            department_id: Set(Some(cs.id)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        let jones = lecturers::ActiveModel {
            name: Set("Dr. Ben Jones".into()),
            email: Set("b.jones@uni.ac.uk".into()),
            academic_qualifications: Set("PhD in Software Engineering".into()),
            employment_type: Set("Part-Time".into()),
            contract_details: Set(None),
            areas_of_expertise: Set(split_delimited("Distributed Systems;Databases")),
            research_interests: Set(split_delimited("Query Optimization")),
            publications: Set(vec![]),
            course_load: Set(0),
            department_id: Set(Some(cs.id)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        let patel = lecturers::ActiveModel {
            name: Set("Dr. Nina Patel".into()),
            email: Set("n.patel@uni.ac.uk".into()),
            academic_qualifications: Set("PhD in Statistics".into()),
            employment_type: Set("Full-Time".into()),
            contract_details: Set(Some("Permanent".into())),
            areas_of_expertise: Set(split_delimited("Bayesian Inference;Time Series")),
            research_interests: Set(split_delimited("Applied Statistics;Forecasting")),
            publications: Set(split_delimited("Priors for Sparse Models")),
            course_load: Set(0),
            department_id: Set(Some(maths.id)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let cs101 = courses::ActiveModel {
            code: Set("CS101".into()),
            name: Set("Introduction to Programming".into()),
            description: Set("Fundamentals of programming".into()),
            level: Set("Undergraduate".into()),
            credits: Set(15),
            schedule: Set(Some("Mon 10:00-12:00, Wed 14:00-16:00".into())),
            department_id: Set(Some(cs.id)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        let cs305 = courses::ActiveModel {
            code: Set("CS305".into()),
            name: Set("Database Systems".into()),
            description: Set("Relational theory, SQL and storage engines".into()),
            level: Set("Undergraduate".into()),
            credits: Set(20),
            schedule: Set(Some("Tue 09:00-11:00".into())),
            department_id: Set(Some(cs.id)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        let ma201 = courses::ActiveModel {
            code: Set("MA201".into()),
            name: Set("Statistical Methods".into()),
            description: Set("Estimation, hypothesis testing and regression".into()),
            level: Set("Undergraduate".into()),
            credits: Set(15),
            schedule: Set(None),
            department_id: Set(Some(maths.id)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let cs101_fall = course_offerings::ActiveModel {
            course_id: Set(cs101.id),
            lecturer_id: Set(smith.id),
            semester: Set(Some("Fall".into())),
            year: Set(Some(2025)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        let cs305_fall = course_offerings::ActiveModel {
            course_id: Set(cs305.id),
            lecturer_id: Set(jones.id),
            semester: Set(Some("Fall".into())),
            year: Set(Some(2025)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        let ma201_spring = course_offerings::ActiveModel {
            course_id: Set(ma201.id),
            lecturer_id: Set(patel.id),
            semester: Set(Some("Spring".into())),
            year: Set(Some(2026)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let bsc_cs = programs::ActiveModel {
            name: Set("Computer Science BSc".into()),
            degree_awarded: Set(Some("Bachelor of Science".into())),
            duration: Set(3),
            course_requirements: Set(Some("120 credits minimum".into())),
            enrollment_details: Set(Some("September intake".into())),
            department_id: Set(Some(cs.id)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        let msc_stats = programs::ActiveModel {
            name: Set("Statistics MSc".into()),
            degree_awarded: Set(Some("Master of Science".into())),
            duration: Set(1),
            course_requirements: Set(None),
            enrollment_details: Set(None),
            department_id: Set(Some(maths.id)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let doe = students::ActiveModel {
            name: Set("John Doe".into()),
            email: Set("john.doe@student.uni.ac.uk".into()),
            date_of_birth: Set(date(2000, 1, 15)),
            year_of_study: Set(2),
            current_grades: Set(75.5),
            graduation_status: Set(false),
            disciplinary_record: Set(false),
            program_id: Set(Some(bsc_cs.id)),
            advisor_id: Set(Some(smith.id)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        let lee = students::ActiveModel {
            name: Set("Mary Lee".into()),
            email: Set("mary.lee@student.uni.ac.uk".into()),
            date_of_birth: Set(date(2001, 6, 3)),
            year_of_study: Set(1),
            current_grades: Set(82.0),
            graduation_status: Set(false),
            disciplinary_record: Set(false),
            program_id: Set(Some(bsc_cs.id)),
            advisor_id: Set(Some(jones.id)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        let okafor = students::ActiveModel {
            name: Set("Sam Okafor".into()),
            email: Set("sam.okafor@student.uni.ac.uk".into()),
            date_of_birth: Set(date(1998, 11, 22)),
            year_of_study: Set(4),
            current_grades: Set(68.3),
            graduation_status: Set(true),
            disciplinary_record: Set(false),
            program_id: Set(Some(msc_stats.id)),
            advisor_id: Set(Some(patel.id)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for (student_id, offering_id, enrolled_on, grade, status) in [
            (
                doe.id,
                cs101_fall.id,
                date(2025, 9, 20),
                None,
                EnrollmentStatus::Active,
            ),
            (
                doe.id,
                cs305_fall.id,
                date(2025, 9, 21),
                None,
                EnrollmentStatus::Active,
            ),
            (
                lee.id,
                cs101_fall.id,
                date(2025, 9, 25),
                None,
                EnrollmentStatus::Active,
            ),
            (
                okafor.id,
                ma201_spring.id,
                date(2026, 1, 12),
                Some(71.0),
                EnrollmentStatus::Completed,
            ),
        ] {
            enrollments::ActiveModel {
                student_id: Set(student_id),
                offering_id: Set(offering_id),
                enrollment_date: Set(enrolled_on),
                grade: Set(grade),
                status: Set(status),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        non_academic_staff::ActiveModel {
            name: Set("Sarah Wilson".into()),
            job_title: Set(Some("Department Administrator".into())),
            employment_type: Set("Full-Time".into()),
            department_id: Set(Some(cs.id)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        non_academic_staff::ActiveModel {
            name: Set("Tom Baker".into()),
            job_title: Set(Some("Lab Technician".into())),
            employment_type: Set("Part-Time".into()),
            department_id: Set(Some(maths.id)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let ml_project = research_projects::ActiveModel {
            title: Set("Advanced Machine Learning Techniques".into()),
            funding_sources: Set(split_delimited("UK Research Council")),
            publications: Set(vec![]),
            outcomes: Set(split_delimited("New ML framework;3 publications")),
            principal_investigator_id: Set(Some(smith.id)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        let forecast_project = research_projects::ActiveModel {
            title: Set("Forecasting at Scale".into()),
            funding_sources: Set(split_delimited("Industry Partner;University Fund")),
            publications: Set(split_delimited("Forecasting at Scale: a Survey")),
            outcomes: Set(vec![]),
            principal_investigator_id: Set(Some(patel.id)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for (lecturer_id, project_id) in [
            (smith.id, ml_project.id),
            (jones.id, ml_project.id),
            (patel.id, forecast_project.id),
            (smith.id, forecast_project.id),
        ] {
            project_team_members::ActiveModel {
                lecturer_id: Set(lecturer_id),
                project_id: Set(project_id),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        // Bring the stored course_load columns in line with the offerings
        for lecturer_id in [smith.id, jones.id, patel.id] {
            LecturerService::refresh_course_load(db, lecturer_id).await?;
        }

        Ok(true)
    }
}
