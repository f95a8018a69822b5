//! User sweep: apply a retention policy to every registration of an instance

use crate::classifier::{classify_record, Decision, RetentionPolicy};
use crate::{Janitor, JanitorError, JanitorEvent, Reporter};
use murmur_domain::VirtualServer;

impl<R: Reporter> Janitor<R> {
    /// Classify every registered user under `policy` and unregister the
    /// ones classified [`Decision::Remove`]
    ///
    /// A rejected unregister is reported and skipped. A failed read or a
    /// malformed last-activity timestamp stops the pass with an error; users
    /// removed before that point stay removed.
    ///
    /// Returns the number of users removed (or, in dry-run, that would be).
    pub fn sweep_users<S: VirtualServer>(
        &mut self,
        server: &mut S,
        policy: RetentionPolicy,
    ) -> Result<usize, JanitorError> {
        let server_id = server.id();
        let now = self.now();

        let user_ids = server
            .registered_user_ids(&self.config.registration_filter)
            .map_err(|e| JanitorError::server(server_id, e))?;

        let mut removed = 0;
        for user_id in user_ids {
            let user = server
                .registration(user_id)
                .map_err(|e| JanitorError::server(server_id, e))?;

            let (decision, last_active) = classify_record(&self.config, &user, now, policy)?;
            if decision == Decision::Keep {
                continue;
            }

            if !self.config.dry_run {
                if let Err(e) = server.unregister_user(user_id) {
                    self.emit(JanitorEvent::UserRemovalRejected {
                        server_id,
                        user_id,
                        name: user.name,
                        policy,
                        last_active,
                        message: e.to_string(),
                    });
                    continue;
                }
            }

            self.emit(JanitorEvent::UserRemoved {
                server_id,
                user_id,
                name: user.name,
                policy,
                last_active,
                dry_run: self.config.dry_run,
            });
            removed += 1;
        }

        Ok(removed)
    }
}
