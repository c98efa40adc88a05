//! 级联删除
//!
//! 删除父记录时同时删除引用它的记录：
//! Session → Experiment → Scan → (Image, ScanNote, Annotation)，
//! Site → Scan，User → (ScanNote, Annotation)。
//! 每次级联在单个事务中执行，任一语句失败时整体回滚。

use surrealdb::{Surreal, engine::any::Any};

use crate::error::Result;
use crate::models::{Annotation, Experiment, Image, Scan, ScanNote, Session, Site, User};
use crate::storage::{Record, Repositories};

/// 删除 `$scans`（扫描 ID 数组）中的扫描及其图像、备注与审阅结论
fn delete_scans() -> String {
    format!(
        "DELETE {image} WHERE scan IN $scans;\n\
         DELETE {note} WHERE scan IN $scans;\n\
         DELETE {annotation} WHERE scan IN $scans;\n\
         DELETE {scan} WHERE record::id(id) IN $scans;\n",
        image = Image::TABLE,
        note = ScanNote::TABLE,
        annotation = Annotation::TABLE,
        scan = Scan::TABLE,
    )
}

fn delete_record<T: Record>() -> String {
    format!("DELETE type::thing('{}', $id);\n", T::TABLE)
}

async fn transaction(db: &Surreal<Any>, id: &str, statements: String) -> Result<()> {
    db.query(format!(
        "BEGIN TRANSACTION;\n{}COMMIT TRANSACTION;",
        statements
    ))
    .bind(("id", id.to_string()))
    .await?
    .check()?;
    Ok(())
}

pub async fn delete_scan(repos: &Repositories, id: &str) -> Result<bool> {
    if !repos.scans.exists(id).await? {
        return Ok(false);
    }

    let statements = format!("LET $scans = [$id];\n{}", delete_scans());
    transaction(&repos.db, id, statements).await?;
    tracing::debug!(scan = %id, "Deleted scan with its images, notes and annotations");
    Ok(true)
}

pub async fn delete_experiment(repos: &Repositories, id: &str) -> Result<bool> {
    if !repos.experiments.exists(id).await? {
        return Ok(false);
    }

    let statements = format!(
        "LET $scans = (SELECT VALUE record::id(id) FROM {} WHERE experiment = $id);\n{}{}",
        Scan::TABLE,
        delete_scans(),
        delete_record::<Experiment>(),
    );
    transaction(&repos.db, id, statements).await?;
    tracing::debug!(experiment = %id, "Deleted experiment with its scans");
    Ok(true)
}

pub async fn delete_session(repos: &Repositories, id: &str) -> Result<bool> {
    if !repos.sessions.exists(id).await? {
        return Ok(false);
    }

    let statements = format!(
        "LET $experiments = (SELECT VALUE record::id(id) FROM {experiment} WHERE session = $id);\n\
         LET $scans = (SELECT VALUE record::id(id) FROM {scan} WHERE experiment IN $experiments);\n\
         {scans}\
         DELETE {experiment} WHERE session = $id;\n\
         {session}",
        experiment = Experiment::TABLE,
        scan = Scan::TABLE,
        scans = delete_scans(),
        session = delete_record::<Session>(),
    );
    transaction(&repos.db, id, statements).await?;
    tracing::debug!(session = %id, "Deleted session with its experiments");
    Ok(true)
}

pub async fn delete_site(repos: &Repositories, id: &str) -> Result<bool> {
    if !repos.sites.exists(id).await? {
        return Ok(false);
    }

    let statements = format!(
        "LET $scans = (SELECT VALUE record::id(id) FROM {} WHERE site = $id);\n{}{}",
        Scan::TABLE,
        delete_scans(),
        delete_record::<Site>(),
    );
    transaction(&repos.db, id, statements).await?;
    tracing::debug!(site = %id, "Deleted site with its scans");
    Ok(true)
}

pub async fn delete_user(repos: &Repositories, id: &str) -> Result<bool> {
    if !repos.users.exists(id).await? {
        return Ok(false);
    }

    let statements = format!(
        "DELETE {} WHERE creator = $id;\nDELETE {} WHERE creator = $id;\n{}",
        ScanNote::TABLE,
        Annotation::TABLE,
        delete_record::<User>(),
    );
    transaction(&repos.db, id, statements).await?;
    tracing::debug!(user = %id, "Deleted user with their notes and annotations");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config::AppConfig;
    use crate::models::Decision;
    use crate::storage::{Filter, SurrealPool};

    async fn repos() -> Repositories {
        let pool = SurrealPool::new(AppConfig::in_memory().database)
            .await
            .unwrap();
        Repositories::surreal(pool.inner().await.unwrap())
    }

    #[tokio::test]
    async fn test_delete_session_cascades_to_scans() {
        let repos = repos().await;
        let session = repos.sessions.create(&Session::new("s")).await.unwrap();
        let site = repos.sites.create(&Site::new("site")).await.unwrap();
        let user = repos.users.create(&User::new("rev")).await.unwrap();
        let experiment = repos
            .experiments
            .create(&Experiment::new(&session.id, "e"))
            .await
            .unwrap();
        let scan = repos
            .scans
            .create(&Scan::new(&experiment.id, &site.id, "1", "T1"))
            .await
            .unwrap();
        repos
            .images
            .create(&Image::new(&scan.id, "a.nii.gz", "/tmp/a.nii.gz", 1))
            .await
            .unwrap();
        repos
            .scan_notes
            .create(&ScanNote::new(&scan.id, &user.id, "ok"))
            .await
            .unwrap();
        repos
            .annotations
            .create(&Annotation::new(&scan.id, &user.id, Decision::Good))
            .await
            .unwrap();

        assert!(delete_session(&repos, &session.id).await.unwrap());

        let all = Filter::new();
        assert_eq!(repos.experiments.count(&all).await.unwrap(), 0);
        assert_eq!(repos.scans.count(&all).await.unwrap(), 0);
        assert_eq!(repos.images.count(&all).await.unwrap(), 0);
        assert_eq!(repos.scan_notes.count(&all).await.unwrap(), 0);
        assert_eq!(repos.annotations.count(&all).await.unwrap(), 0);
        assert_eq!(repos.sites.count(&all).await.unwrap(), 1);
        assert_eq!(repos.users.count(&all).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_user_removes_their_notes() {
        let repos = repos().await;
        let user = repos.users.create(&User::new("rev")).await.unwrap();
        let other = repos.users.create(&User::new("other")).await.unwrap();
        repos
            .scan_notes
            .create(&ScanNote::new("scan", &user.id, "mine"))
            .await
            .unwrap();
        repos
            .scan_notes
            .create(&ScanNote::new("scan", &other.id, "theirs"))
            .await
            .unwrap();

        assert!(delete_user(&repos, &user.id).await.unwrap());
        let remaining = repos.scan_notes.find(&Filter::new()).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].creator, other.id);
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        let repos = repos().await;
        assert!(!delete_site(&repos, "missing").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_site_keeps_other_sites_scans() {
        let repos = repos().await;
        let session = repos.sessions.create(&Session::new("s")).await.unwrap();
        let experiment = repos
            .experiments
            .create(&Experiment::new(&session.id, "e"))
            .await
            .unwrap();
        let closing = repos.sites.create(&Site::new("closing")).await.unwrap();
        let staying = repos.sites.create(&Site::new("staying")).await.unwrap();
        let gone = repos
            .scans
            .create(&Scan::new(&experiment.id, &closing.id, "1", "T1"))
            .await
            .unwrap();
        let kept = repos
            .scans
            .create(&Scan::new(&experiment.id, &staying.id, "2", "T1"))
            .await
            .unwrap();
        repos
            .images
            .create(&Image::new(&gone.id, "a.nii.gz", "/tmp/a.nii.gz", 1))
            .await
            .unwrap();
        repos
            .images
            .create(&Image::new(&kept.id, "b.nii.gz", "/tmp/b.nii.gz", 1))
            .await
            .unwrap();

        assert!(delete_site(&repos, &closing.id).await.unwrap());

        let scans = repos.scans.find(&Filter::new()).await.unwrap();
        assert_eq!(scans.len(), 1);
        assert_eq!(scans[0].id, kept.id);
        let images = repos.images.find(&Filter::new()).await.unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].scan, kept.id);
        assert_eq!(repos.experiments.count(&Filter::new()).await.unwrap(), 1);
    }
}
