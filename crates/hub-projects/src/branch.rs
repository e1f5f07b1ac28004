use git2::Repository;
use std::path::Path;
use tracing::trace;

/// Current git branch of the project.
///
/// Linked worktrees resolve to their own branch. A branch with no commits
/// yet still reports its name. A detached head yields the abbreviated
/// commit. No repository yields `None`.
pub fn current_branch(project_path: &Path) -> Option<String> {
    let repo = Repository::open(project_path).ok()?;

    let branch = match repo.head() {
        Ok(head) if head.is_branch() => head.shorthand().map(String::from),
        Ok(head) => head
            .target()
            .map(|oid| oid.to_string().chars().take(7).collect()),
        Err(e) => {
            trace!(project = %project_path.display(), error = %e, "no resolvable HEAD");
            unborn_branch(&repo)
        }
    };
    branch
}

/// Branch HEAD points at before its first commit.
fn unborn_branch(repo: &Repository) -> Option<String> {
    let head = repo.find_reference("HEAD").ok()?;
    let target = head.symbolic_target()?;
    let branch = target.strip_prefix("refs/heads/").unwrap_or(target);
    (!branch.is_empty()).then(|| branch.to_string())
}
