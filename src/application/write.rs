//! Component persistence to a working directory

use std::path::Path;

use crate::consumer::BitJson;
use crate::domain::entities::Component;
use crate::domain::ports::FileSystem;
use crate::error::BitResult;

/// Files touched by [`Component::write`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub written: usize,
    pub skipped: usize,
}

impl WriteReport {
    fn record(&mut self, written: bool) {
        if written {
            self.written += 1;
        } else {
            self.skipped += 1;
        }
    }
}

/// Removes a directory on drop unless the write it guards completed
struct DirGuard<'a> {
    fs: &'a dyn FileSystem,
    dir: &'a Path,
    created: bool,
    armed: bool,
}

impl<'a> DirGuard<'a> {
    fn acquire(fs: &'a dyn FileSystem, dir: &'a Path) -> BitResult<Self> {
        let created = !fs.exists(dir);
        if created {
            fs.create_dir_all(dir)?;
        }
        Ok(Self {
            fs,
            dir,
            created,
            armed: true,
        })
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for DirGuard<'_> {
    fn drop(&mut self) {
        if self.armed && self.created {
            let _ = self.fs.remove_dir_all(self.dir);
        }
    }
}

impl Component {
    /// Write the component's artifacts into `dir`
    ///
    /// Order: implementation, specs, misc files, dist, `bit.json` (when
    /// `with_bit_json`), license. Existing files are kept unless `force`.
    /// The first failing step aborts the rest; a directory created by this
    /// call is removed again in that case.
    pub fn write(
        &self,
        fs: &dyn FileSystem,
        dir: &Path,
        with_bit_json: bool,
        force: bool,
    ) -> BitResult<WriteReport> {
        let guard = DirGuard::acquire(fs, dir)?;
        let mut report = WriteReport::default();

        report.record(self.implementation().write(fs, dir, self.impl_file(), force)?);

        if let Some(specs) = self.specs() {
            report.record(specs.write(fs, dir, self.specs_file(), force)?);
        }

        if let Some(misc) = self.misc() {
            let written = misc.write(fs, dir, force)?;
            report.written += written;
            report.skipped += misc.files().len() - written;
        }

        if let Some(dist) = self.dist() {
            report.record(dist.write(fs, dir, self.impl_file(), force)?);
        }

        if with_bit_json {
            report.record(self.write_bit_json(fs, dir, force)?);
        }

        if let Some(license) = self.license_with_content()? {
            report.record(license.write_license(fs, dir, force)?);
        }

        guard.disarm();
        Ok(report)
    }

    /// Project the component's config into `dir/bit.json`
    pub fn write_bit_json(&self, fs: &dyn FileSystem, dir: &Path, force: bool) -> BitResult<bool> {
        BitJson::new(
            self.impl_file(),
            self.specs_file(),
            self.misc_files().to_vec(),
            self.compiler_id(),
            self.tester_id(),
            self.dependencies(),
            self.package_dependencies().clone(),
        )
        .with_provenance(self.version(), self.scope())
        .write(fs, dir, force)
    }
}
