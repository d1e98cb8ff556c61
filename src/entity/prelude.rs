//! 预导入模块，方便使用

pub use super::attendance::{
    ActiveModel as AttendanceActiveModel, Entity as Attendance, Model as AttendanceModel,
};
pub use super::branch_subjects::{
    ActiveModel as BranchSubjectActiveModel, Entity as BranchSubjects,
    Model as BranchSubjectModel,
};
pub use super::branches::{
    ActiveModel as BranchActiveModel, Entity as Branches, Model as BranchModel,
};
pub use super::events::{ActiveModel as EventActiveModel, Entity as Events, Model as EventModel};
pub use super::marks::{ActiveModel as MarkActiveModel, Entity as Marks, Model as MarkModel};
pub use super::student_profiles::{
    ActiveModel as StudentProfileActiveModel, Entity as StudentProfiles,
    Model as StudentProfileModel,
};
pub use super::teacher_assignments::{
    ActiveModel as TeacherAssignmentActiveModel, Entity as TeacherAssignments,
    Model as TeacherAssignmentModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
