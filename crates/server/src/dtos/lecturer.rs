use database::services::lecturer::{
    AdviseeRow, LecturerDetailBundle, LecturerRow, OfferingTaught, RankedSupervisor, TeamProject,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct LecturerQueryParams {
    pub department_id: Option<i32>,
    pub expertise_area: Option<String>,
    pub research_area: Option<String>,
    pub employment_type: Option<String>,
    pub min_course_load: Option<i32>,
    pub max_course_load: Option<i32>,
    pub top_supervisors: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LecturerResponse {
    pub lecturer_id: i32,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub employment_type: String,
    pub course_load: u64,
    pub areas_of_expertise: Vec<String>,
    pub research_areas: Vec<String>,
    pub academic_qualifications: String,
}

impl From<LecturerRow> for LecturerResponse {
    fn from(row: LecturerRow) -> Self {
        LecturerResponse {
            lecturer_id: row.lecturer.id,
            name: row.lecturer.name,
            email: row.lecturer.email,
            department: row.department,
            employment_type: row.lecturer.employment_type,
            course_load: row.course_load,
            areas_of_expertise: row.lecturer.areas_of_expertise,
            research_areas: row.lecturer.research_interests,
            academic_qualifications: row.lecturer.academic_qualifications,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TopSupervisorResponse {
    pub lecturer_id: i32,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub academic_qualifications: String,
    pub projects_count: u64,
    pub rank: u64,
}

impl From<RankedSupervisor> for TopSupervisorResponse {
    fn from(ranked: RankedSupervisor) -> Self {
        TopSupervisorResponse {
            lecturer_id: ranked.lecturer.id,
            name: ranked.lecturer.name,
            email: ranked.lecturer.email,
            department: ranked.department,
            academic_qualifications: ranked.lecturer.academic_qualifications,
            projects_count: ranked.projects_count,
            rank: ranked.rank,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseTaught {
    pub course_code: Option<String>,
    pub course_name: Option<String>,
    pub semester: Option<String>,
    pub year: Option<i32>,
    pub enrolled_students: u64,
}

impl From<OfferingTaught> for CourseTaught {
    fn from(taught: OfferingTaught) -> Self {
        CourseTaught {
            course_code: taught.course.as_ref().map(|c| c.code.clone()),
            course_name: taught.course.map(|c| c.name),
            semester: taught.offering.semester,
            year: taught.offering.year,
            enrolled_students: taught.enrolled_students,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdvisedStudent {
    pub student_id: i32,
    pub name: String,
    pub year: i32,
    pub program: Option<String>,
}

impl From<AdviseeRow> for AdvisedStudent {
    fn from(row: AdviseeRow) -> Self {
        AdvisedStudent {
            student_id: row.student.id,
            name: row.student.name,
            year: row.student.year_of_study,
            program: row.program,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ResearchProjectEntry {
    pub project_id: i32,
    pub title: String,
    pub role: String,
    pub funding_sources: Vec<String>,
    pub principal_investigator: Option<String>,
    pub outcomes: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LecturerDetailResponse {
    pub lecturer_id: i32,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub employment_type: String,
    pub contract_details: Option<String>,
    pub areas_of_expertise: Vec<String>,
    pub research_areas: Vec<String>,
    pub academic_qualifications: String,
    pub publications: Vec<String>,
    pub course_load: u64,
    pub courses_taught: Vec<CourseTaught>,
    pub advisee_count: u64,
    pub advised_students: Vec<AdvisedStudent>,
    pub principal_investigator_count: u64,
    pub team_member_count: u64,
    pub total_research_projects: u64,
    pub research_projects: Vec<ResearchProjectEntry>,
}

impl From<LecturerDetailBundle> for LecturerDetailResponse {
    fn from(bundle: LecturerDetailBundle) -> Self {
        let lecturer_name = bundle.lecturer.name.clone();

        // Projects led first, then team memberships; the service already
        // excludes led projects from the team list
        let mut research_projects: Vec<ResearchProjectEntry> = bundle
            .principal_projects
            .into_iter()
            .map(|project| ResearchProjectEntry {
                project_id: project.id,
                title: project.title,
                role: "Principal Investigator".into(),
                funding_sources: project.funding_sources,
                principal_investigator: Some(lecturer_name.clone()),
                outcomes: project.outcomes,
            })
            .collect();
        let principal_investigator_count = research_projects.len() as u64;

        research_projects.extend(bundle.team_projects.into_iter().map(
            |TeamProject {
                 project,
                 principal_investigator,
             }| ResearchProjectEntry {
                project_id: project.id,
                title: project.title,
                role: "Team Member".into(),
                funding_sources: project.funding_sources,
                principal_investigator,
                outcomes: project.outcomes,
            },
        ));
        let total_research_projects = research_projects.len() as u64;
        let team_member_count = total_research_projects - principal_investigator_count;

        LecturerDetailResponse {
            lecturer_id: bundle.lecturer.id,
            name: bundle.lecturer.name,
            email: bundle.lecturer.email,
            department: bundle.department,
            employment_type: bundle.lecturer.employment_type,
            contract_details: bundle.lecturer.contract_details,
            areas_of_expertise: bundle.lecturer.areas_of_expertise,
            research_areas: bundle.lecturer.research_interests,
            academic_qualifications: bundle.lecturer.academic_qualifications,
            publications: bundle.lecturer.publications,
            course_load: bundle.offerings.len() as u64,
            courses_taught: bundle.offerings.into_iter().map(CourseTaught::from).collect(),
            advisee_count: bundle.advisees.len() as u64,
            advised_students: bundle
                .advisees
                .into_iter()
                .map(AdvisedStudent::from)
                .collect(),
            principal_investigator_count,
            team_member_count,
            total_research_projects,
            research_projects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::entities::{lecturers, research_projects};

    fn lecturer() -> lecturers::Model {
        lecturers::Model {
            id: 1,
            name: "Dr. Alice Smith".into(),
            email: "a.smith@uni.ac.uk".into(),
            academic_qualifications: "PhD in Computer Science".into(),
            employment_type: "Full-Time".into(),
            contract_details: None,
            areas_of_expertise: vec!["AI".into()],
            course_load: 2,
            research_interests: vec!["Machine Learning".into(), "Neural Networks".into()],
            publications: vec![],
            department_id: Some(1),
        }
    }

    fn project(id: i32, title: &str, pi: Option<i32>) -> research_projects::Model {
        research_projects::Model {
            id,
            title: title.into(),
            funding_sources: vec![],
            publications: vec![],
            outcomes: vec![],
            principal_investigator_id: pi,
        }
    }

    #[test]
    fn research_projects_merge_led_and_team_roles() {
        let detail = LecturerDetailResponse::from(LecturerDetailBundle {
            lecturer: lecturer(),
            department: Some("Computer Science".into()),
            offerings: vec![],
            advisees: vec![],
            principal_projects: vec![project(1, "Advanced ML", Some(1))],
            team_projects: vec![TeamProject {
                project: project(2, "Forecasting at Scale", Some(3)),
                principal_investigator: Some("Dr. Nina Patel".into()),
            }],
        });

        assert_eq!(detail.principal_investigator_count, 1);
        assert_eq!(detail.team_member_count, 1);
        assert_eq!(detail.total_research_projects, 2);
        assert_eq!(detail.research_projects[0].role, "Principal Investigator");
        assert_eq!(
            detail.research_projects[0].principal_investigator.as_deref(),
            Some("Dr. Alice Smith")
        );
        assert_eq!(detail.research_projects[1].role, "Team Member");
        assert_eq!(
            detail.research_projects[1].principal_investigator.as_deref(),
            Some("Dr. Nina Patel")
        );
    }

    #[test]
    fn summary_maps_research_interests_to_research_areas() {
        let response = LecturerResponse::from(LecturerRow {
            lecturer: lecturer(),
            department: Some("Computer Science".into()),
            course_load: 2,
        });
        assert_eq!(
            response.research_areas,
            vec!["Machine Learning".to_string(), "Neural Networks".to_string()]
        );
        assert_eq!(response.course_load, 2);
    }
}
